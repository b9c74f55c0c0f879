//! Layered error definitions
//!
//! `ContractError` covers the outer shell (config / replay / feedback / io).
//! `CoreError` covers faults raised inside the tick engine; all of them are recoverable.

use thiserror::Error;

/// Unified error type for everything outside the tick engine
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Intake Errors =====
    /// Recorded session could not be decoded
    #[error("replay parse error at line {line}: {message}")]
    ReplayParse { line: usize, message: String },

    // ===== Feedback Errors =====
    /// Outbound device command could not be delivered
    #[error("feedback '{sink_name}' error: {message}")]
    Feedback { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create replay parse error
    pub fn replay_parse(line: usize, message: impl Into<String>) -> Self {
        Self::ReplayParse {
            line,
            message: message.into(),
        }
    }

    /// Create feedback delivery error
    pub fn feedback(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Feedback {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}

/// Faults raised by the tick engine
///
/// None of these terminates a session: the engine always falls back to a
/// well-defined state (idle capture, unchanged menu) and reports the fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Orientation sample with a non-finite component; prior buckets are kept
    #[error("invalid orientation sample: {detail}")]
    InvalidOrientation { detail: String },

    /// Motion segment never left its settling origin
    #[error("motion segment did not settle within {waited_ms}ms")]
    MotionTimeout { waited_ms: u64 },

    /// A segment of a gesture capture timed out; the whole gesture is abandoned
    #[error("gesture capture abandoned at segment {segment}: no motion within {waited_ms}ms")]
    GestureTimeout { segment: usize, waited_ms: u64 },

    /// Cursor index outside its list
    #[error("cursor index {index} out of range for list of length {len}")]
    CursorOutOfRange { index: usize, len: usize },
}

impl CoreError {
    /// Short stable name, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOrientation { .. } => "invalid_orientation",
            Self::MotionTimeout { .. } => "motion_timeout",
            Self::GestureTimeout { .. } => "gesture_timeout",
            Self::CursorOutOfRange { .. } => "cursor_out_of_range",
        }
    }
}
