//! LogFeedback - reports commands through tracing

use contracts::{ContractError, DeviceFeedback, UnlockMode};
use tracing::{debug, info};

/// Sink that logs every command, for running without a device
pub struct LogFeedback {
    name: String,
    unlock_requests: u64,
    vibrations: u64,
}

impl LogFeedback {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unlock_requests: 0,
            vibrations: 0,
        }
    }

    /// Commands logged so far
    pub fn logged(&self) -> u64 {
        self.unlock_requests + self.vibrations
    }
}

impl DeviceFeedback for LogFeedback {
    fn name(&self) -> &str {
        &self.name
    }

    fn request_unlock(&mut self, mode: UnlockMode) -> Result<(), ContractError> {
        self.unlock_requests += 1;
        debug!(sink = %self.name, ?mode, count = self.unlock_requests, "unlock requested");
        Ok(())
    }

    fn notify_action(&mut self) -> Result<(), ContractError> {
        self.vibrations += 1;
        info!(sink = %self.name, count = self.vibrations, "vibrate");
        Ok(())
    }
}
