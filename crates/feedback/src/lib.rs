//! # Feedback
//!
//! Outbound device commands.
//!
//! Responsibilities:
//! - Deliver `DeviceCommand`s from each tick report to every configured sink
//! - Keep sink failures away from the tick loop (logged and counted only)

pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod sinks;

pub use contracts::{DeviceCommand, DeviceFeedback};
pub use dispatcher::FeedbackDispatcher;
pub use error::FeedbackError;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{LogFeedback, RecordedCommands, RecordingFeedback};
