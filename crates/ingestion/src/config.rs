//! Backpressure configuration and metrics

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

pub use contracts::DropPolicy;
use contracts::IntakeConfig;

/// Backpressure configuration
#[derive(Debug, Clone)]
pub struct BackpressureConfig {
    /// Pending events kept between ticks
    pub backlog_capacity: usize,

    /// Events released per tick
    pub max_per_tick: usize,

    /// Drop policy when full
    pub drop_policy: DropPolicy,
}

impl Default for BackpressureConfig {
    fn default() -> Self {
        IntakeConfig::default().into()
    }
}

impl From<IntakeConfig> for BackpressureConfig {
    fn from(intake: IntakeConfig) -> Self {
        Self {
            backlog_capacity: intake.backlog_capacity,
            max_per_tick: intake.max_events_per_tick,
            drop_policy: intake.drop_policy,
        }
    }
}

impl BackpressureConfig {
    pub fn new(backlog_capacity: usize, max_per_tick: usize, drop_policy: DropPolicy) -> Self {
        Self {
            backlog_capacity,
            max_per_tick,
            drop_policy,
        }
    }
}

/// Ingestion metrics
#[derive(Debug, Default)]
pub struct IngestionMetrics {
    /// Events pulled from the source
    pub events_received: AtomicU64,

    /// Events discarded on backlog overflow
    pub events_dropped: AtomicU64,

    /// Batches handed to the engine
    pub batches: AtomicU64,

    /// Events still pending after the last drain
    pub backlog_len: AtomicUsize,
}

impl IngestionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self, count: usize) {
        self.events_received
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.events_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_batch(&self) {
        self.batches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn update_backlog_len(&self, len: usize) {
        self.backlog_len.store(len, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_received: self.events_received.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
            backlog_len: self.backlog_len.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub events_received: u64,
    pub events_dropped: u64,
    pub batches: u64,
    pub backlog_len: usize,
}
