//! Session metrics
//!
//! Per-tick recording into the `metrics` facade plus an in-memory aggregate
//! printed when a session ends.

use std::collections::BTreeMap;
use std::fmt;

use contracts::{DeviceCommand, EngineEvent, TickReport};
use metrics::{counter, histogram};

/// Record everything one tick produced
///
/// ```ignore
/// let report = engine.tick(&batch);
/// observability::record_tick_report(&report);
/// ```
pub fn record_tick_report(report: &TickReport) {
    counter!("armband_ticks_total").increment(1);
    histogram!("armband_events_per_tick").record(report.events_in as f64);

    for command in &report.commands {
        let name = match command {
            DeviceCommand::RequestUnlock { .. } => "request_unlock",
            DeviceCommand::NotifyAction => "notify_action",
        };
        counter!("armband_commands_total", "command" => name).increment(1);
    }

    for event in &report.events {
        match event {
            EngineEvent::SelectionMade { mode, .. } => {
                counter!("armband_selections_total", "mode" => mode.as_str()).increment(1);
            }
            EngineEvent::GestureRecognized { gesture } => {
                let label = gesture.label.map_or("unlabeled", |l| l.as_str());
                counter!("armband_gestures_total", "label" => label).increment(1);
            }
            EngineEvent::Fault(err) => {
                counter!("armband_faults_total", "kind" => err.kind()).increment(1);
            }
            EngineEvent::MenuChanged { to, .. } => {
                counter!("armband_menu_changes_total", "to" => to.as_str()).increment(1);
            }
            _ => {}
        }
    }
}

/// In-memory session totals
#[derive(Debug, Clone, Default)]
pub struct SessionMetricsAggregator {
    pub total_ticks: u64,
    pub total_events: u64,
    pub total_commands: u64,
    pub cursor_moves: u64,
    pub captures_cancelled: u64,

    /// Selections per menu mode
    pub selections: BTreeMap<String, u64>,

    /// Recognized gestures per label
    pub gestures: BTreeMap<String, u64>,

    /// Faults per kind
    pub faults: BTreeMap<String, u64>,

    pub events_per_tick: RunningStats,
    pub scroll_delay_ms: RunningStats,
}

impl SessionMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, report: &TickReport) {
        self.total_ticks += 1;
        self.total_events += report.events_in as u64;
        self.total_commands += report.commands.len() as u64;
        self.events_per_tick.push(report.events_in as f64);

        for event in &report.events {
            match event {
                EngineEvent::CursorMoved { delay_ms, .. } => {
                    self.cursor_moves += 1;
                    self.scroll_delay_ms.push(*delay_ms as f64);
                }
                EngineEvent::SelectionMade { mode, .. } => {
                    *self.selections.entry(mode.to_string()).or_insert(0) += 1;
                }
                EngineEvent::GestureRecognized { gesture } => {
                    let label = gesture.label.map_or("unlabeled", |l| l.as_str());
                    *self.gestures.entry(label.to_string()).or_insert(0) += 1;
                }
                EngineEvent::CaptureCancelled => self.captures_cancelled += 1,
                EngineEvent::Fault(err) => {
                    *self.faults.entry(err.kind().to_string()).or_insert(0) += 1;
                }
                _ => {}
            }
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_ticks: self.total_ticks,
            total_events: self.total_events,
            total_commands: self.total_commands,
            cursor_moves: self.cursor_moves,
            captures_cancelled: self.captures_cancelled,
            selections: self.selections.clone(),
            gestures: self.gestures.clone(),
            faults: self.faults.clone(),
            events_per_tick: StatsSummary::from(&self.events_per_tick),
            scroll_delay_ms: StatsSummary::from(&self.scroll_delay_ms),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Session summary
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_ticks: u64,
    pub total_events: u64,
    pub total_commands: u64,
    pub cursor_moves: u64,
    pub captures_cancelled: u64,
    pub selections: BTreeMap<String, u64>,
    pub gestures: BTreeMap<String, u64>,
    pub faults: BTreeMap<String, u64>,
    pub events_per_tick: StatsSummary,
    pub scroll_delay_ms: StatsSummary,
}

fn write_counts(f: &mut fmt::Formatter<'_>, title: &str, counts: &BTreeMap<String, u64>) -> fmt::Result {
    if counts.is_empty() {
        return writeln!(f, "{title}: none");
    }
    writeln!(f, "{title}:")?;
    for (key, count) in counts {
        writeln!(f, "  {key}: {count}")?;
    }
    Ok(())
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Session Summary ===")?;
        writeln!(f, "Ticks: {}", self.total_ticks)?;
        writeln!(f, "Events: {}", self.total_events)?;
        writeln!(f, "Commands: {}", self.total_commands)?;
        writeln!(f, "Cursor moves: {}", self.cursor_moves)?;
        writeln!(f, "Events per tick: {}", self.events_per_tick)?;
        writeln!(f, "Scroll delay (ms): {}", self.scroll_delay_ms)?;
        write_counts(f, "Selections", &self.selections)?;
        write_counts(f, "Gestures", &self.gestures)?;
        writeln!(f, "Cancelled captures: {}", self.captures_cancelled)?;
        write_counts(f, "Faults", &self.faults)
    }
}

/// Summary of a [`RunningStats`]
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            return write!(f, "N/A");
        }
        write!(
            f,
            "min={:.1}, max={:.1}, mean={:.2}, std={:.2} (n={})",
            self.min, self.max, self.mean, self.std_dev, self.count
        )
    }
}

/// Online mean and variance (Welford)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
            return;
        }

        self.min = self.min.min(value);
        self.max = self.max.max(value);
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
