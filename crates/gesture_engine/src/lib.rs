//! # Gesture Engine
//!
//! Tick-driven core of the armband navigator.
//!
//! Responsible for:
//! - Quantizing orientation samples into 18 buckets per axis
//! - Keeping the current sensor state
//! - Recording motion segments and three-segment gestures
//! - Labeling gestures (WAVE / SLICE)
//! - Tilt-driven menu navigation with confirm / cancel poses
//!
//! ## Example
//!
//! ```ignore
//! use gesture_engine::{EngineConfig, GestureEngine};
//!
//! let mut engine = GestureEngine::new(EngineConfig::default())?;
//!
//! // One batch of device events per tick
//! let report = engine.tick(&events);
//! for (mode, index) in report.selections() {
//!     // Handle the selection
//! }
//! ```

mod capture;
mod classifier;
mod engine;
mod menu;
mod motion;
mod quantizer;
mod state;

pub use capture::{CapturePhase, CaptureStep, GestureCapture};
pub use classifier::{classify, label};
pub use engine::{CaptureProgress, GestureEngine, Snapshot};
pub use menu::{
    scroll_delay_ms, BoundedCursor, MenuNavigator, MenuState, SCROLL_DOWN_BELOW, SCROLL_UP_ABOVE,
};
pub use motion::{MotionPhase, MotionRecorder};
pub use quantizer::{quantize, quantize_quaternion, quaternion_to_euler};
pub use state::SensorState;

// Re-export contracts types
pub use contracts::{
    CaptureConfig, EngineConfig, EngineEvent, Gesture, GestureLabel, MenuConfig, MenuMode,
    OrientationBuckets, TickReport,
};
