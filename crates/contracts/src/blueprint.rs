//! SessionBlueprint - config loader output
//!
//! Describes a complete session: device timing, capture tuning, menu layout, feedback routing.

use serde::{Deserialize, Serialize};

use crate::{CaptureConfig, EngineConfig, MenuConfig, DEFAULT_TICK_MS};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete session blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Device settings
    #[serde(default)]
    pub device: DeviceConfig,

    /// Event intake backlog
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Gesture capture settings
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Menu layout and designated poses
    #[serde(default)]
    pub menu: MenuConfig,

    /// Outbound command routing
    #[serde(default = "default_feedback")]
    pub feedback: Vec<FeedbackConfig>,
}

impl Default for SessionBlueprint {
    fn default() -> Self {
        Self {
            version: ConfigVersion::V1,
            device: DeviceConfig::default(),
            intake: IntakeConfig::default(),
            capture: CaptureConfig::default(),
            menu: MenuConfig::default(),
            feedback: default_feedback(),
        }
    }
}

/// A single log sink, used when the config has no `[[feedback]]` entries
fn default_feedback() -> Vec<FeedbackConfig> {
    vec![FeedbackConfig {
        name: "device_log".to_string(),
        feedback_type: FeedbackType::Log,
    }]
}

impl SessionBlueprint {
    /// Tick engine configuration derived from this blueprint
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            tick_ms: self.device.tick_ms,
            capture: self.capture.clone(),
            menu: self.menu.clone(),
        }
    }
}

/// Device settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: String,

    /// Tick period in milliseconds
    pub tick_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "armband".to_string(),
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

/// Event intake configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Pending events kept between ticks
    pub backlog_capacity: usize,

    /// Events handed to the engine per tick; the rest wait in the backlog
    pub max_events_per_tick: usize,

    /// What to discard when the backlog is full
    pub drop_policy: DropPolicy,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            backlog_capacity: 256,
            max_events_per_tick: 64,
            drop_policy: DropPolicy::DropOldest,
        }
    }
}

/// Backlog overflow policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicy {
    /// Discard the oldest pending event
    #[default]
    DropOldest,
    /// Discard the incoming event
    DropNewest,
}

/// Feedback sink configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Sink name (used for logging/metrics)
    pub name: String,

    /// Sink type
    pub feedback_type: FeedbackType,
}

/// Feedback sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    /// Log every command through tracing
    Log,
    /// Keep commands in memory
    Record,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pose;

    #[test]
    fn test_empty_document_is_default_session() {
        let bp: SessionBlueprint = toml::from_str("").unwrap();
        assert_eq!(bp.device.tick_ms, 50);
        assert_eq!(bp.menu.confirm_pose, Pose::FingersSpread);
        assert_eq!(bp, SessionBlueprint::default());
        assert_eq!(bp.feedback[0].name, "device_log");
        assert_eq!(bp.intake.drop_policy, DropPolicy::DropOldest);
    }

    #[test]
    fn test_intake_section() {
        let bp: SessionBlueprint = toml::from_str(
            r#"
[intake]
backlog_capacity = 8
drop_policy = "drop_newest"
"#,
        )
        .unwrap();
        assert_eq!(bp.intake.backlog_capacity, 8);
        assert_eq!(bp.intake.drop_policy, DropPolicy::DropNewest);
    }

    #[test]
    fn test_explicit_empty_feedback_is_kept() {
        let bp: SessionBlueprint = toml::from_str("feedback = []").unwrap();
        assert!(bp.feedback.is_empty());

        let bp: SessionBlueprint = toml::from_str("[device]\ntick_ms = 20").unwrap();
        assert_eq!(bp.feedback, SessionBlueprint::default().feedback);
    }

    #[test]
    fn test_engine_config_takes_device_tick() {
        let mut bp = SessionBlueprint::default();
        bp.device.tick_ms = 20;
        let config = bp.engine_config();
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.capture, bp.capture);
    }
}
