//! Event pump
//!
//! Sits between an [`EventSource`] and the engine. Each call pulls one batch,
//! queues it in a bounded backlog and releases at most `max_per_tick` events
//! in arrival order. Overflow is resolved by the drop policy.

use std::fmt;
use std::sync::Arc;

use contracts::{EventSource, SensorEvent};
use ringbuf::{traits::*, HeapRb};
use tracing::{debug, instrument, trace};

use crate::config::{BackpressureConfig, DropPolicy, IngestionMetrics};

/// Bounded intake between a source and the tick loop
pub struct EventPump {
    source: Box<dyn EventSource>,
    backlog: HeapRb<SensorEvent>,
    config: BackpressureConfig,
    metrics: Arc<IngestionMetrics>,
    exhausted: bool,
}

impl fmt::Debug for EventPump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPump")
            .field("source", &self.source.name())
            .field("pending", &self.backlog.occupied_len())
            .field("config", &self.config)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl EventPump {
    pub fn new(source: Box<dyn EventSource>, config: BackpressureConfig) -> Self {
        let capacity = config.backlog_capacity.max(1);
        debug!(
            source = %source.name(),
            capacity,
            max_per_tick = config.max_per_tick,
            "event pump created"
        );
        Self {
            source,
            backlog: HeapRb::new(capacity),
            config,
            metrics: Arc::new(IngestionMetrics::new()),
            exhausted: false,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn metrics(&self) -> Arc<IngestionMetrics> {
        self.metrics.clone()
    }

    /// Events waiting for a later tick
    pub fn pending(&self) -> usize {
        self.backlog.occupied_len()
    }

    /// Whether the source has ended (the backlog may still hold events)
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Events for the next tick
    ///
    /// Returns `None` once the source is exhausted and the backlog is empty.
    #[instrument(name = "event_pump_drain", level = "trace", skip(self), fields(source = %self.source.name()))]
    pub fn pump(&mut self) -> Option<Vec<SensorEvent>> {
        if !self.exhausted {
            match self.source.next_batch() {
                Some(batch) => {
                    self.metrics.record_received(batch.len());
                    metrics::counter!("armband_events_received_total").increment(batch.len() as u64);
                    for event in batch {
                        self.enqueue(event);
                    }
                }
                None => {
                    debug!(source = %self.source.name(), pending = self.pending(), "source exhausted");
                    self.exhausted = true;
                }
            }
        }

        if self.exhausted && self.backlog.is_empty() {
            return None;
        }

        let take = self.config.max_per_tick.max(1);
        let released: Vec<SensorEvent> = self.backlog.pop_iter().take(take).collect();

        let pending = self.pending();
        self.metrics.update_backlog_len(pending);
        self.metrics.record_batch();
        metrics::gauge!("armband_pending_events").set(pending as f64);
        trace!(released = released.len(), pending, "batch released");

        Some(released)
    }

    fn enqueue(&mut self, event: SensorEvent) {
        if self.backlog.is_full() {
            self.metrics.record_dropped();
            metrics::counter!("armband_events_dropped_total", "stage" => "backlog").increment(1);
            match self.config.drop_policy {
                DropPolicy::DropNewest => {
                    trace!(?event, "backlog full, incoming event dropped");
                    return;
                }
                DropPolicy::DropOldest => {
                    let dropped = self.backlog.try_pop();
                    trace!(?dropped, "backlog full, oldest event dropped");
                }
            }
        }
        let _ = self.backlog.try_push(event);
    }
}
