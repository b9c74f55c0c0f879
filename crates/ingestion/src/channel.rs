//! Live event source fed over an async-channel
//!
//! The transport thread (or task) holds an [`EventSender`]; the tick loop
//! drains whatever arrived since the previous tick.

use async_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use contracts::{EventSource, SensorEvent};
use tracing::{debug, trace, warn};

use crate::error::{IngestionError, Result};

/// Create a bounded live source and its producer handle
pub fn channel(name: impl Into<String>, capacity: usize) -> (EventSender, ChannelEventSource) {
    let name = name.into();
    let (tx, rx) = bounded(capacity.max(1));
    debug!(source = %name, capacity, "live event channel created");
    (
        EventSender {
            name: name.clone(),
            tx,
        },
        ChannelEventSource { name, rx },
    )
}

/// Producer side of a live source
#[derive(Debug, Clone)]
pub struct EventSender {
    name: String,
    tx: Sender<SensorEvent>,
}

impl EventSender {
    /// Non-blocking send; returns `false` when the channel is full
    pub fn try_send(&self, event: SensorEvent) -> Result<bool> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => {
                trace!(source = %self.name, "live channel full, event dropped");
                metrics::counter!("armband_events_dropped_total", "stage" => "channel")
                    .increment(1);
                Ok(false)
            }
            Err(TrySendError::Closed(_)) => Err(IngestionError::ChannelClosed {
                source_name: self.name.clone(),
            }),
        }
    }

    /// Send, waiting for room
    pub async fn send(&self, event: SensorEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| IngestionError::ChannelClosed {
                source_name: self.name.clone(),
            })
    }

    /// Send from a plain thread, blocking until there is room
    pub fn send_blocking(&self, event: SensorEvent) -> Result<()> {
        self.tx
            .send_blocking(event)
            .map_err(|_| IngestionError::ChannelClosed {
                source_name: self.name.clone(),
            })
    }

    /// Close the channel; the source ends once drained
    pub fn close(&self) -> bool {
        self.tx.close()
    }
}

/// Consumer side of a live source
#[derive(Debug)]
pub struct ChannelEventSource {
    name: String,
    rx: Receiver<SensorEvent>,
}

impl ChannelEventSource {
    /// Events waiting in the channel
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl EventSource for ChannelEventSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_batch(&mut self) -> Option<Vec<SensorEvent>> {
        let mut batch = Vec::with_capacity(self.rx.len());
        loop {
            match self.rx.try_recv() {
                Ok(event) => batch.push(event),
                Err(TryRecvError::Empty) => return Some(batch),
                Err(TryRecvError::Closed) => {
                    if batch.is_empty() {
                        warn!(source = %self.name, "live source closed");
                        return None;
                    }
                    return Some(batch);
                }
            }
        }
    }
}
