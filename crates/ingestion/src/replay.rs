//! Recorded sessions
//!
//! JSON Lines, one record per event:
//!
//! ```text
//! {"tick":0,"event":{"type":"arm_sync","arm":"left","direction":"toward_wrist"}}
//! {"tick":3,"event":{"type":"pose","pose":"wave_in"}}
//! ```
//!
//! Ticks are zero-based and non-decreasing. Ticks without records replay as
//! empty batches. A record without an event only marks its tick as part of
//! the session, so trailing silence survives a round trip. Blank lines and
//! lines starting with `#` are skipped.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use contracts::{EventSource, SensorEvent};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IngestionError, Result};

/// One line of a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub tick: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<SensorEvent>,
}

/// Event source backed by a recording
///
/// Only ticks that carry events are stored; gaps are produced on the fly.
#[derive(Debug, Clone)]
pub struct ReplayEventSource {
    name: String,
    batches: VecDeque<(u64, Vec<SensorEvent>)>,
    next_tick: u64,
    total_ticks: u64,
}

impl ReplayEventSource {
    /// Load a recording from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| IngestionError::ReplayIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut source = Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            IngestionError::RecordWrite(source) => IngestionError::ReplayIo {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        source.name = path.display().to_string();
        info!(path = %path.display(), ticks = source.total_ticks, "recording loaded");
        Ok(source)
    }

    /// Parse a recording from any buffered reader
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut batches: VecDeque<(u64, Vec<SensorEvent>)> = VecDeque::new();
        let mut total_ticks = 0u64;
        let mut last_tick: Option<u64> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let record: ReplayRecord =
                serde_json::from_str(trimmed).map_err(|e| IngestionError::ReplayParse {
                    line: line_no,
                    message: e.to_string(),
                })?;

            if let Some(last) = last_tick {
                if record.tick < last {
                    return Err(IngestionError::ReplayParse {
                        line: line_no,
                        message: format!("tick {} goes back from tick {last}", record.tick),
                    });
                }
            }
            last_tick = Some(record.tick);

            total_ticks = record
                .tick
                .checked_add(1)
                .ok_or_else(|| IngestionError::ReplayParse {
                    line: line_no,
                    message: format!("tick {} out of range", record.tick),
                })?;

            let Some(event) = record.event else {
                continue;
            };
            match batches.back_mut() {
                Some((tick, events)) if *tick == record.tick => events.push(event),
                _ => batches.push_back((record.tick, vec![event])),
            }
        }

        debug!(ticks = total_ticks, busy_ticks = batches.len(), "recording parsed");
        Ok(Self {
            name: "replay".to_string(),
            batches,
            next_tick: 0,
            total_ticks,
        })
    }

    /// Ticks not yet delivered
    pub fn remaining(&self) -> u64 {
        self.total_ticks - self.next_tick
    }
}

impl EventSource for ReplayEventSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_batch(&mut self) -> Option<Vec<SensorEvent>> {
        if self.next_tick >= self.total_ticks {
            return None;
        }
        let tick = self.next_tick;
        self.next_tick += 1;
        match self.batches.front() {
            Some((next, _)) if *next == tick => self.batches.pop_front().map(|(_, events)| events),
            _ => Some(Vec::new()),
        }
    }
}

/// Writes batches as a recording, one line per event
pub struct ReplayWriter<W: Write> {
    writer: W,
    tick: u64,
    written: u64,
    /// Last tick that has a line in the output
    last_written_tick: Option<u64>,
}

impl<W: Write> ReplayWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            tick: 0,
            written: 0,
            last_written_tick: None,
        }
    }

    /// Append the batch for the next tick
    ///
    /// Empty batches write nothing; `finish` marks a trailing run of them.
    pub fn write_batch(&mut self, events: &[SensorEvent]) -> Result<()> {
        for event in events {
            self.write_record(ReplayRecord {
                tick: self.tick,
                event: Some(*event),
            })?;
            self.written += 1;
        }
        self.tick += 1;
        Ok(())
    }

    /// Events written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Ticks recorded so far, including empty ones
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Mark the final tick if it had no events, then flush
    pub fn finish(mut self) -> Result<W> {
        if let Some(last) = self.tick.checked_sub(1) {
            if self.last_written_tick != Some(last) {
                self.write_record(ReplayRecord {
                    tick: last,
                    event: None,
                })?;
            }
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_record(&mut self, record: ReplayRecord) -> Result<()> {
        let line = serde_json::to_string(&record).map_err(|e| IngestionError::ReplayParse {
            line: self.written as usize + 1,
            message: e.to_string(),
        })?;
        writeln!(self.writer, "{line}")?;
        self.last_written_tick = Some(record.tick);
        Ok(())
    }
}
