//! Ingestion error types

use std::path::PathBuf;

use contracts::ContractError;
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Recording could not be opened or read
    #[error("failed to read recording {}: {source}", path.display())]
    ReplayIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recording line could not be decoded
    #[error("recording line {line}: {message}")]
    ReplayParse { line: usize, message: String },

    /// Recording could not be written
    #[error("failed to write recording: {0}")]
    RecordWrite(#[from] std::io::Error),

    /// The producer side of a live source went away
    #[error("channel closed for source {source_name}")]
    ChannelClosed { source_name: String },
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;

impl From<IngestionError> for ContractError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::ReplayParse { line, message } => {
                ContractError::replay_parse(line, message)
            }
            IngestionError::ReplayIo { source, .. } | IngestionError::RecordWrite(source) => {
                ContractError::Io(source)
            }
            other => ContractError::Other(other.to_string()),
        }
    }
}
