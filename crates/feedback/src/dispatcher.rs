//! FeedbackDispatcher - fan-out of device commands to sinks

use std::collections::HashMap;
use std::sync::Arc;

use contracts::{DeviceCommand, DeviceFeedback, FeedbackConfig, FeedbackType};
use tracing::{debug, instrument, warn};

use crate::error::FeedbackError;
use crate::metrics::{MetricsSnapshot, SinkMetrics};
use crate::sinks::{LogFeedback, RecordedCommands, RecordingFeedback};

struct SinkEntry {
    sink: Box<dyn DeviceFeedback>,
    metrics: Arc<SinkMetrics>,
}

/// Delivers each command to every sink
///
/// A failing sink never stops delivery to the others and never reaches the
/// caller: the failure is logged and counted.
#[derive(Default)]
pub struct FeedbackDispatcher {
    sinks: Vec<SinkEntry>,
    recordings: HashMap<String, RecordedCommands>,
}

impl FeedbackDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build sinks from configuration
    #[instrument(name = "feedback_from_configs", skip(configs), fields(sink_count = configs.len()))]
    pub fn from_configs(configs: &[FeedbackConfig]) -> Result<Self, FeedbackError> {
        let mut dispatcher = Self::new();
        for config in configs {
            match config.feedback_type {
                FeedbackType::Log => dispatcher.add_sink(Box::new(LogFeedback::new(&config.name)))?,
                FeedbackType::Record => {
                    let sink = RecordingFeedback::new(&config.name);
                    let recorded = sink.recorded();
                    dispatcher.add_sink(Box::new(sink))?;
                    dispatcher.recordings.insert(config.name.clone(), recorded);
                }
            }
        }
        Ok(dispatcher)
    }

    /// Register a sink; names must be unique
    pub fn add_sink(&mut self, sink: Box<dyn DeviceFeedback>) -> Result<(), FeedbackError> {
        if sink.name().is_empty() {
            return Err(FeedbackError::sink_creation("", "sink name cannot be empty"));
        }
        if self.sinks.iter().any(|e| e.sink.name() == sink.name()) {
            return Err(FeedbackError::DuplicateSink(sink.name().to_string()));
        }
        debug!(sink = %sink.name(), "feedback sink registered");
        self.sinks.push(SinkEntry {
            sink,
            metrics: Arc::new(SinkMetrics::new()),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|e| e.sink.name()).collect()
    }

    /// Commands kept by a `record` sink created from configuration
    pub fn recorded(&self, name: &str) -> Option<Vec<DeviceCommand>> {
        self.recordings.get(name).map(RecordedCommands::commands)
    }

    pub fn dispatch(&mut self, command: &DeviceCommand) {
        for entry in &mut self.sinks {
            let result = match *command {
                DeviceCommand::RequestUnlock { mode } => entry.sink.request_unlock(mode),
                DeviceCommand::NotifyAction => entry.sink.notify_action(),
            };
            match result {
                Ok(()) => entry.metrics.inc_delivered(),
                Err(e) => {
                    entry.metrics.inc_failures();
                    ::metrics::counter!("armband_feedback_failures_total", "sink" => entry.sink.name().to_string())
                        .increment(1);
                    warn!(sink = %entry.sink.name(), ?command, error = %e, "feedback delivery failed");
                }
            }
        }
    }

    /// Deliver a tick's commands in order
    pub fn dispatch_all(&mut self, commands: &[DeviceCommand]) {
        for command in commands {
            self.dispatch(command);
        }
    }

    /// Delivery metrics per sink
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.sinks
            .iter()
            .map(|e| (e.sink.name().to_string(), e.metrics.snapshot()))
            .collect()
    }
}
