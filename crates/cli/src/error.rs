//! Error types for CLI operations.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration could not be loaded or failed validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] contracts::ContractError),

    /// Event source could not be opened
    #[error("Failed to open event source: {0}")]
    Source(#[from] ingestion::IngestionError),

    /// Engine rejected the configuration
    #[error("Failed to start engine: {0}")]
    Engine(#[from] contracts::CoreError),

    /// Feedback sinks could not be built
    #[error("Failed to set up feedback: {0}")]
    Feedback(#[from] feedback::FeedbackError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}
