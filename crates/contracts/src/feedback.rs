//! DeviceFeedback trait - outbound command interface

use crate::{ContractError, UnlockMode};

/// Receiver of fire-and-forget device commands
///
/// Errors are reported to the caller for logging only; the engine never
/// waits on or reacts to delivery results.
pub trait DeviceFeedback: Send {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Keep the device unlocked
    fn request_unlock(&mut self, mode: UnlockMode) -> Result<(), ContractError>;

    /// Vibrate to confirm an action
    fn notify_action(&mut self) -> Result<(), ContractError>;
}
