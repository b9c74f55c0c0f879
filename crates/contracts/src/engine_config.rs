//! Tick engine configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};

use crate::Pose;

/// Default tick period: the device event loop runs 20 times a second
pub const DEFAULT_TICK_MS: u64 = 50;

/// Tick engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Clock advance per tick (milliseconds)
    pub tick_ms: u64,

    /// Motion / gesture capture configuration
    pub capture: CaptureConfig,

    /// Menu navigator configuration
    pub menu: MenuConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            capture: CaptureConfig::default(),
            menu: MenuConfig::default(),
        }
    }
}

/// Motion segment and gesture capture configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Re-sample one tick after arming and measure deltas from that sample
    pub arming_lag: bool,

    /// Bucket distance on any axis that ends the settling phase
    pub move_threshold: u8,

    /// Wait after the threshold is crossed before the final sample
    pub settle_delay_ms: u64,

    /// Pause between consecutive segments
    pub segment_pause_ms: u64,

    /// Upper bound on the settling phase of one segment
    pub segment_timeout_ms: u64,

    /// Pose that starts a capture while the menu is in Main
    pub trigger_pose: Option<Pose>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            arming_lag: true,
            move_threshold: 3,
            settle_delay_ms: 300,
            segment_pause_ms: 300,
            segment_timeout_ms: 20_000,
            trigger_pose: Some(Pose::DoubleTap),
        }
    }
}

/// Menu navigator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Pose that opens list A from any mode
    pub open_list_a_pose: Pose,

    /// Pose that opens list B from any mode
    pub open_list_b_pose: Pose,

    /// Pose that leaves a list without selecting
    pub cancel_pose: Pose,

    /// Pose that selects the item under the cursor
    pub confirm_pose: Pose,

    pub list_a: MenuListConfig,

    pub list_b: MenuListConfig,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            open_list_a_pose: Pose::WaveIn,
            open_list_b_pose: Pose::WaveOut,
            cancel_pose: Pose::Fist,
            confirm_pose: Pose::FingersSpread,
            list_a: MenuListConfig::numbered("messages", "a"),
            list_b: MenuListConfig::numbered("emojis", ""),
        }
    }
}

/// One selectable list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuListConfig {
    /// Display name
    pub name: String,

    /// Items in display order
    pub items: Vec<String>,
}

impl MenuListConfig {
    /// Eleven items `"1{suffix}"` .. `"11{suffix}"`
    pub fn numbered(name: &str, suffix: &str) -> Self {
        Self {
            name: name.to_string(),
            items: (1..=11).map(|i| format!("{i}{suffix}")).collect(),
        }
    }
}
