//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - The engine owns a millisecond clock advanced once per tick
//! - Every delay (settle, pause, scroll gate) is a deadline on that clock, never a sleep

mod blueprint;
mod command;
mod engine_config;
mod error;
mod event;
mod event_source;
mod feedback;
mod gesture;
mod menu;
mod orientation;
mod report;

pub use blueprint::*;
pub use command::*;
pub use engine_config::*;
pub use error::*;
pub use event::*;
pub use event_source::EventSource;
pub use feedback::DeviceFeedback;
pub use gesture::*;
pub use menu::*;
pub use orientation::*;
pub use report::*;
