//! Outbound device commands

use serde::{Deserialize, Serialize};

/// How long the device should stay unlocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockMode {
    /// Until told otherwise, so a pose can be held
    Held,
    /// A short period, relocking after inactivity
    Timed,
}

/// Fire-and-forget command issued back to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DeviceCommand {
    RequestUnlock { mode: UnlockMode },
    /// Haptic confirmation that a pose produced an action
    NotifyAction,
}
