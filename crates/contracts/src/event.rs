//! SensorEvent - transport output
//!
//! Closed set of events the device transport can deliver in one tick batch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Orientation sample as a unit quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// The identity rotation (device level, facing forward)
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// All four components are finite
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Static hand pose recognized by the armband
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    /// No pose reported yet
    #[default]
    None,
    Unknown,
    Rest,
    Fist,
    WaveIn,
    WaveOut,
    FingersSpread,
    DoubleTap,
}

impl Pose {
    /// A deliberate gesture pose, as opposed to `none` / `unknown` / `rest`
    pub fn is_gesture(self) -> bool {
        !matches!(self, Pose::None | Pose::Unknown | Pose::Rest)
    }

    /// Device-style name (`waveIn`, `fingersSpread`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Pose::None => "none",
            Pose::Unknown => "unknown",
            Pose::Rest => "rest",
            Pose::Fist => "fist",
            Pose::WaveIn => "waveIn",
            Pose::WaveOut => "waveOut",
            Pose::FingersSpread => "fingersSpread",
            Pose::DoubleTap => "doubleTap",
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arm the device is worn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arm {
    Left,
    Right,
}

/// Direction the device's +x axis faces on the arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XDirection {
    TowardWrist,
    TowardElbow,
}

/// Pose delivery lock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    #[default]
    Locked,
    Unlocked,
}

/// Inbound device event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorEvent {
    /// New orientation sample
    Orientation { quat: Quaternion },
    /// Recognized pose changed
    Pose { pose: Pose },
    /// Device recognized the arm it is worn on
    ArmSync { arm: Arm, direction: XDirection },
    /// Device moved off its synced position
    ArmUnsync,
    Lock,
    Unlock,
    /// Device disconnected
    Unpair,
}

impl SensorEvent {
    /// Short stable name, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            SensorEvent::Orientation { .. } => "orientation",
            SensorEvent::Pose { .. } => "pose",
            SensorEvent::ArmSync { .. } => "arm_sync",
            SensorEvent::ArmUnsync => "arm_unsync",
            SensorEvent::Lock => "lock",
            SensorEvent::Unlock => "unlock",
            SensorEvent::Unpair => "unpair",
        }
    }
}
