//! Tick engine.
//!
//! One call per tick: ingest events → update sensor state → advance capture →
//! advance menu. Nothing here sleeps; every delay is a deadline on `now_ms`.

use contracts::{
    CoreError, EngineConfig, EngineEvent, Gesture, Pose, SensorEvent, TickReport,
    SEGMENTS_PER_GESTURE,
};
use metrics::counter;
use tracing::{debug, info, instrument, warn};

use crate::capture::{CapturePhase, CaptureStep, GestureCapture};
use crate::classifier;
use crate::menu::{MenuNavigator, MenuState};
use crate::state::SensorState;

/// Progress of the capture in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureProgress {
    pub completed_segments: usize,
    pub phase: CapturePhase,
}

/// Read-only view for presentation
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub now_ms: u64,
    pub sensor: SensorState,
    pub menu: MenuState,
    /// Label under the cursor when a list is open
    pub selected_item: Option<String>,
    pub capture: Option<CaptureProgress>,
    pub last_gesture: Option<Gesture>,
}

/// Single-threaded tick engine
#[derive(Debug)]
pub struct GestureEngine {
    config: EngineConfig,
    state: SensorState,
    navigator: MenuNavigator,
    capture: Option<GestureCapture>,
    last_gesture: Option<Gesture>,
    /// Pose seen at the end of the previous tick, for trigger edge detection
    last_pose: Pose,
    now_ms: u64,
    tick: u64,
}

impl GestureEngine {
    /// Fails only when a menu list is empty
    pub fn new(config: EngineConfig) -> Result<Self, CoreError> {
        let navigator = MenuNavigator::new(config.menu.clone())?;

        Ok(Self {
            config,
            state: SensorState::default(),
            navigator,
            capture: None,
            last_gesture: None,
            last_pose: Pose::None,
            now_ms: 0,
            tick: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sensor(&self) -> &SensorState {
        &self.state
    }

    pub fn navigator(&self) -> &MenuNavigator {
        &self.navigator
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn capture_in_progress(&self) -> bool {
        self.capture.is_some()
    }

    pub fn last_gesture(&self) -> Option<&Gesture> {
        self.last_gesture.as_ref()
    }

    /// Run one tick of the configured length
    pub fn tick(&mut self, events: &[SensorEvent]) -> TickReport {
        self.advance(self.config.tick_ms, events)
    }

    /// Run one tick after `elapsed_ms` of wall time
    #[instrument(
        level = "trace",
        name = "gesture_engine_tick",
        skip(self, events),
        fields(tick = self.tick + 1, batch = events.len())
    )]
    pub fn advance(&mut self, elapsed_ms: u64, events: &[SensorEvent]) -> TickReport {
        self.tick += 1;
        self.now_ms += elapsed_ms;

        let mut report = TickReport {
            tick: self.tick,
            now_ms: self.now_ms,
            events_in: events.len(),
            ..Default::default()
        };

        self.ingest(events, &mut report);
        self.step_capture(&mut report.events);
        self.navigator
            .step(&self.state, self.now_ms, &mut report.events);
        self.check_trigger(&mut report.events);

        report
    }

    /// Start a capture; sampling begins on the next tick
    ///
    /// Returns false when one is already running.
    pub fn begin_capture(&mut self) -> bool {
        if self.capture.is_some() {
            return false;
        }
        self.capture = Some(GestureCapture::new(&self.config.capture));
        counter!("armband_captures_total", "outcome" => "started").increment(1);
        info!(tick = self.tick, "gesture capture started");
        true
    }

    /// Discard the capture in flight, if any
    pub fn cancel_capture(&mut self) -> bool {
        match self.capture.take() {
            Some(mut capture) => {
                capture.cancel();
                counter!("armband_captures_total", "outcome" => "cancelled").increment(1);
                info!(tick = self.tick, "gesture capture cancelled");
                true
            }
            None => false,
        }
    }

    /// Drop the capture and return the menu to Main; sensor state and clock are kept
    pub fn restart_session(&mut self) {
        self.cancel_capture();
        self.navigator.reset();
        self.last_gesture = None;
        debug!(tick = self.tick, "session restarted");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            now_ms: self.now_ms,
            sensor: self.state.clone(),
            menu: self.navigator.state(),
            selected_item: self.navigator.selected_item().map(str::to_string),
            capture: self.capture.as_ref().map(|capture| CaptureProgress {
                completed_segments: capture.completed_segments(),
                phase: capture.phase(),
            }),
            last_gesture: self.last_gesture.clone(),
        }
    }

    fn ingest(&mut self, events: &[SensorEvent], report: &mut TickReport) {
        for event in events {
            if let Err(err) = self.state.apply(event, &mut report.commands) {
                warn!(error = %err, "sensor event rejected");
                report.events.push(EngineEvent::Fault(err));
                continue;
            }

            if matches!(event, SensorEvent::Unpair) && self.cancel_capture() {
                report.events.push(EngineEvent::CaptureCancelled);
            }
        }

        if !report.commands.is_empty() {
            debug!(commands = report.commands.len(), "device commands queued");
        }
    }

    fn step_capture(&mut self, events: &mut Vec<EngineEvent>) {
        let Some(capture) = self.capture.as_mut() else {
            return;
        };

        match capture.step(self.state.buckets, self.now_ms) {
            Ok(CaptureStep::Waiting) => {}
            Ok(CaptureStep::SegmentRecorded { index, segment }) => {
                events.push(EngineEvent::SegmentRecorded { index, segment });
            }
            Ok(CaptureStep::Completed {
                segment,
                mut gesture,
            }) => {
                self.capture = None;
                let label = classifier::label(&mut gesture);
                counter!("armband_captures_total", "outcome" => "completed").increment(1);
                info!(%label, tick = self.tick, "gesture recognized");

                events.push(EngineEvent::SegmentRecorded {
                    index: SEGMENTS_PER_GESTURE - 1,
                    segment,
                });
                events.push(EngineEvent::GestureRecognized {
                    gesture: gesture.clone(),
                });
                self.last_gesture = Some(gesture);
            }
            Err(err) => {
                self.capture = None;
                counter!("armband_captures_total", "outcome" => "abandoned").increment(1);
                warn!(error = %err, "gesture capture abandoned");
                events.push(EngineEvent::Fault(err));
            }
        }
    }

    fn check_trigger(&mut self, events: &mut Vec<EngineEvent>) {
        let pose = self.state.pose;
        let pose_started = pose != self.last_pose;
        self.last_pose = pose;

        let Some(trigger) = self.config.capture.trigger_pose else {
            return;
        };
        if pose_started
            && pose == trigger
            && !self.navigator.mode().is_list()
            && self.begin_capture()
        {
            events.push(EngineEvent::CaptureStarted);
        }
    }
}
