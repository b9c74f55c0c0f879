//! Session orchestrator - one tick loop from source to feedback.

use std::fs::File;
use std::future::Future;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{EngineEvent, EventSource, MenuMode, SessionBlueprint, TickReport};
use feedback::FeedbackDispatcher;
use gesture_engine::GestureEngine;
use ingestion::{EventPump, MockEventSource, ReplayEventSource, ReplayWriter};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::render::{status_line, StatusLine};
use super::SessionStats;
use crate::error::CliError;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub blueprint: SessionBlueprint,

    /// Recording to replay (None = built-in demo)
    pub replay_path: Option<PathBuf>,

    /// Where to record the session's events
    pub record_path: Option<PathBuf>,

    /// Stop after this many ticks (None = until the source ends)
    pub max_ticks: Option<u64>,

    /// Skip the wait between ticks
    pub fast: bool,

    /// Begin a gesture capture before the first tick
    pub start_capture: bool,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,

    pub render: bool,
}

/// Runs the engine against one event source
pub struct Session {
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    fn open_source(&self) -> Result<Box<dyn EventSource>, CliError> {
        match &self.config.replay_path {
            Some(path) => {
                info!(path = %path.display(), "Running in REPLAY mode");
                Ok(Box::new(ReplayEventSource::from_path(path)?))
            }
            None => {
                info!("Running the built-in demo (no device required)");
                Ok(Box::new(MockEventSource::demo()))
            }
        }
    }

    fn open_recorder(&self) -> Result<Option<ReplayWriter<BufWriter<File>>>> {
        let Some(path) = &self.config.record_path else {
            return Ok(None);
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create recording {}", path.display()))?;
        info!(path = %path.display(), "Recording session events");
        Ok(Some(ReplayWriter::new(BufWriter::new(file))))
    }

    /// Run until the source ends, the tick limit is hit or `shutdown` resolves
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<SessionStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        let source = self.open_source()?;
        let mut pump = EventPump::new(source, blueprint.intake.clone().into());
        let mut engine = GestureEngine::new(blueprint.engine_config()).map_err(CliError::from)?;
        let mut feedback =
            FeedbackDispatcher::from_configs(&blueprint.feedback).map_err(CliError::from)?;
        if feedback.is_empty() {
            warn!("No feedback sinks configured - device commands will be dropped");
        }
        let mut recorder = self.open_recorder()?;
        let mut status = StatusLine::stdout(self.config.render);

        if self.config.start_capture && engine.begin_capture() {
            info!("Gesture capture armed");
        }

        let tick = Duration::from_millis(blueprint.device.tick_ms);
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            source = %pump.source_name(),
            tick_ms = blueprint.device.tick_ms,
            max_ticks = ?self.config.max_ticks,
            sinks = feedback.len(),
            "Session running"
        );

        let mut stats = SessionStats::default();
        tokio::pin!(shutdown);

        loop {
            if let Some(max) = self.config.max_ticks {
                if stats.ticks >= max {
                    info!(ticks = stats.ticks, "Reached max ticks limit");
                    break;
                }
            }

            if self.config.fast {
                tokio::select! {
                    biased;
                    _ = &mut shutdown => {
                        stats.interrupted = true;
                        break;
                    }
                    _ = tokio::task::yield_now() => {}
                }
            } else {
                tokio::select! {
                    _ = &mut shutdown => {
                        stats.interrupted = true;
                        break;
                    }
                    _ = interval.tick() => {}
                }
            }

            let Some(batch) = pump.pump() else {
                info!("Event source finished");
                break;
            };

            if let Some(writer) = recorder.as_mut() {
                writer
                    .write_batch(&batch)
                    .context("Failed to write recording")?;
            }

            let report = engine.tick(&batch);
            feedback.dispatch_all(&report.commands);
            observability::record_tick_report(&report);
            stats.update(&report);

            announce(&engine, &report, &mut status, &mut stats)?;
            let snapshot = engine.snapshot();
            let list_name = engine
                .navigator()
                .list(snapshot.menu.mode)
                .map(|list| list.name.as_str());
            status.draw(&status_line(&snapshot, list_name))?;
        }

        status.finish()?;
        if stats.interrupted {
            warn!("Received shutdown signal, stopping session...");
        }

        if let Some(writer) = recorder {
            let written = writer.written();
            writer.finish().context("Failed to flush recording")?;
            info!(events = written, "Recording closed");
        }

        stats.duration = start_time.elapsed();
        stats.intake = pump.metrics().snapshot();
        stats.feedback = feedback.metrics();

        info!(
            ticks = stats.ticks,
            duration_secs = stats.duration.as_secs_f64(),
            selections = stats.selections.len(),
            "Session complete"
        );

        Ok(stats)
    }
}

/// Print what the user should see and log the rest
fn announce(
    engine: &GestureEngine,
    report: &TickReport,
    status: &mut StatusLine<std::io::Stdout>,
    stats: &mut SessionStats,
) -> Result<()> {
    let navigator = engine.navigator();
    for event in &report.events {
        match event {
            EngineEvent::MenuChanged { from, to } => {
                debug!(%from, %to, "menu changed");
                let label = match to {
                    MenuMode::Main => "Main menu".to_string(),
                    mode => navigator
                        .list(*mode)
                        .map(|list| format!("Menu: {}", list.name))
                        .unwrap_or_else(|| format!("Menu: {mode}")),
                };
                status.message(&label)?;
            }
            EngineEvent::SelectionMade { mode, index } => {
                let item = navigator
                    .item(*mode, *index)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{index}"));
                status.message(&format!("Selected: {item}"))?;
                stats.selections.push(item);
            }
            EngineEvent::GestureRecognized { gesture } => {
                let label = gesture.label.map_or("unlabeled", |l| l.as_str());
                status.message(&format!("Gesture: {label}"))?;
            }
            EngineEvent::CaptureCancelled => status.message("Gesture capture cancelled")?,
            EngineEvent::Fault(err) => warn!(kind = err.kind(), error = %err, "engine fault"),
            _ => {}
        }
    }
    Ok(())
}
