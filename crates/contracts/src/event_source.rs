//! EventSource trait - device event intake abstraction
//!
//! Decouples the tick pump from where events come from: a live transport,
//! a recorded session, or a scripted mock scenario.

use crate::SensorEvent;

/// Pull-based source of per-tick event batches
///
/// # Example
///
/// ```ignore
/// let mut source: Box<dyn EventSource> = get_event_source();
/// while let Some(batch) = source.next_batch() {
///     engine.tick(&batch);
/// }
/// ```
pub trait EventSource: Send {
    /// Source name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Events that arrived since the previous call
    ///
    /// Returns `None` once the source is exhausted. An empty batch means
    /// "nothing arrived this tick" and must not end the session.
    fn next_batch(&mut self) -> Option<Vec<SensorEvent>>;
}
