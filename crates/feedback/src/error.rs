//! Feedback error types

use thiserror::Error;

/// Feedback-specific errors
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// Sink creation error
    #[error("failed to create feedback sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// Two sinks share a name
    #[error("duplicate feedback sink '{0}'")]
    DuplicateSink(String),

    /// Delivery error (from contract)
    #[error("feedback error: {0}")]
    Contract(#[from] contracts::ContractError),
}

impl FeedbackError {
    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
