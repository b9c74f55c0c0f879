//! # Ingestion
//!
//! Device event intake.
//!
//! Responsibilities:
//! - Event sources: scripted mock sessions, JSON Lines recordings, live channels
//! - Recording sessions for later replay
//! - Bounded backlog with drop policy and a per-tick release limit
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::{BackpressureConfig, EventPump, MockEventSource};
//!
//! let mut pump = EventPump::new(Box::new(MockEventSource::demo()), BackpressureConfig::default());
//! while let Some(batch) = pump.pump() {
//!     let report = engine.tick(&batch);
//! }
//! ```

mod channel;
mod config;
mod error;
mod mock;
mod pump;
mod replay;

// Re-exports
pub use channel::{channel, ChannelEventSource, EventSender};
pub use config::{BackpressureConfig, DropPolicy, IngestionMetrics, MetricsSnapshot};
pub use contracts::{EventSource, SensorEvent};
pub use error::{IngestionError, Result};
pub use mock::{full_turn_angle, orientation, pitch_angle, MockEventSource, ScenarioBuilder};
pub use pump::EventPump;
pub use replay::{ReplayEventSource, ReplayRecord, ReplayWriter};
