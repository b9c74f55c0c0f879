//! Session statistics

use std::time::Duration;

use contracts::TickReport;
use feedback::MetricsSnapshot as FeedbackSnapshot;
use ingestion::MetricsSnapshot as IntakeSnapshot;
use observability::SessionMetricsAggregator;

/// Statistics from a session run
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Ticks executed
    pub ticks: u64,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Engine clock at the end of the run (milliseconds)
    pub engine_ms: u64,

    /// Selections made, as item labels
    pub selections: Vec<String>,

    /// Whether the run ended on a shutdown signal
    pub interrupted: bool,

    pub intake: IntakeSnapshot,

    /// Delivery metrics per feedback sink
    pub feedback: Vec<(String, FeedbackSnapshot)>,

    /// Per-tick aggregate
    pub metrics: SessionMetricsAggregator,
}

impl SessionStats {
    pub fn update(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.engine_ms = report.now_ms;
        self.metrics.update(report);
    }

    /// Ticks per wall-clock second
    pub fn tick_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.ticks as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    pub fn print_summary(&self) {
        println!();
        println!("Duration: {:.2}s ({:.1} ticks/s)", self.duration.as_secs_f64(), self.tick_rate());
        println!("Engine clock: {} ms", self.engine_ms);
        if self.interrupted {
            println!("Stopped by signal");
        }
        println!(
            "Intake: {} received, {} dropped, {} pending",
            self.intake.events_received, self.intake.events_dropped, self.intake.backlog_len
        );
        for (sink, snapshot) in &self.feedback {
            println!(
                "Feedback '{sink}': {} delivered, {} failed",
                snapshot.delivered, snapshot.failures
            );
        }
        if !self.selections.is_empty() {
            println!("Selected: {}", self.selections.join(", "));
        }
        print!("{}", self.metrics.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_tracks_clock() {
        let mut stats = SessionStats::default();
        stats.update(&TickReport {
            tick: 1,
            now_ms: 50,
            ..Default::default()
        });
        stats.update(&TickReport {
            tick: 2,
            now_ms: 100,
            ..Default::default()
        });
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.engine_ms, 100);
        assert_eq!(stats.metrics.total_ticks, 2);
    }

    #[test]
    fn test_tick_rate() {
        let stats = SessionStats {
            ticks: 40,
            duration: Duration::from_secs(2),
            ..Default::default()
        };
        assert!((stats.tick_rate() - 20.0).abs() < 1e-9);
        assert_eq!(SessionStats::default().tick_rate(), 0.0);
    }
}
