//! Feedback sink implementations

mod log;
mod record;

pub use self::log::LogFeedback;
pub use self::record::{RecordedCommands, RecordingFeedback};
