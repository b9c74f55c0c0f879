//! RecordingFeedback - keeps commands in memory

use std::sync::{Arc, Mutex};

use contracts::{ContractError, DeviceCommand, DeviceFeedback, UnlockMode};
use tracing::trace;

/// Shared view of the commands a [`RecordingFeedback`] has received
#[derive(Debug, Clone, Default)]
pub struct RecordedCommands {
    inner: Arc<Mutex<Vec<DeviceCommand>>>,
}

impl RecordedCommands {
    /// Copy of everything recorded so far
    pub fn commands(&self) -> Vec<DeviceCommand> {
        self.inner
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|commands| commands.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of haptic confirmations
    pub fn vibrations(&self) -> usize {
        self.commands()
            .iter()
            .filter(|c| matches!(c, DeviceCommand::NotifyAction))
            .count()
    }

    fn push(&self, command: DeviceCommand) -> Result<(), String> {
        self.inner
            .lock()
            .map(|mut commands| commands.push(command))
            .map_err(|e| e.to_string())
    }
}

/// Sink that records every command, for tests and session capture
pub struct RecordingFeedback {
    name: String,
    recorded: RecordedCommands,
}

impl RecordingFeedback {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recorded: RecordedCommands::default(),
        }
    }

    /// Handle that stays readable after the sink is moved into a dispatcher
    pub fn recorded(&self) -> RecordedCommands {
        self.recorded.clone()
    }

    fn record(&self, command: DeviceCommand) -> Result<(), ContractError> {
        trace!(sink = %self.name, ?command, "command recorded");
        self.recorded
            .push(command)
            .map_err(|message| ContractError::feedback(&self.name, message))
    }
}

impl DeviceFeedback for RecordingFeedback {
    fn name(&self) -> &str {
        &self.name
    }

    fn request_unlock(&mut self, mode: UnlockMode) -> Result<(), ContractError> {
        self.record(DeviceCommand::RequestUnlock { mode })
    }

    fn notify_action(&mut self) -> Result<(), ContractError> {
        self.record(DeviceCommand::NotifyAction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut sink = RecordingFeedback::new("rec");
        let handle = sink.recorded();
        assert!(handle.is_empty());

        sink.request_unlock(UnlockMode::Timed).unwrap();
        sink.notify_action().unwrap();

        assert_eq!(
            handle.commands(),
            vec![
                DeviceCommand::RequestUnlock {
                    mode: UnlockMode::Timed
                },
                DeviceCommand::NotifyAction
            ]
        );
        assert_eq!(handle.vibrations(), 1);
        assert_eq!(handle.len(), 2);
    }
}
