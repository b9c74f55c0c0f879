//! Session orchestration module.

mod orchestrator;
mod render;
mod stats;

pub use orchestrator::{Session, SessionConfig};
pub use stats::SessionStats;
