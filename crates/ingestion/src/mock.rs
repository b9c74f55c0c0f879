//! Mock event source
//!
//! Scripted sessions for running without a device. Orientation is streamed
//! every tick the way the armband does, built from Euler angles.

use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_2, PI};

use contracts::{Arm, EventSource, Pose, Quaternion, SensorEvent, XDirection, BUCKET_COUNT};
use nalgebra::UnitQuaternion;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Orientation event for the given Euler angles (radians)
pub fn orientation(roll: f64, pitch: f64, yaw: f64) -> SensorEvent {
    let q = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
    SensorEvent::Orientation {
        quat: Quaternion::new(q.w, q.i, q.j, q.k),
    }
}

/// Roll or yaw angle at the center of `bucket`
pub fn full_turn_angle(bucket: u8) -> f64 {
    (f64::from(bucket) + 0.5) / f64::from(BUCKET_COUNT) * 2.0 * PI - PI
}

/// Pitch angle at the center of `bucket`
pub fn pitch_angle(bucket: u8) -> f64 {
    (f64::from(bucket) + 0.5) / f64::from(BUCKET_COUNT) * PI - FRAC_PI_2
}

/// Current attitude of the scripted arm
#[derive(Debug, Clone, Copy, PartialEq)]
struct Attitude {
    roll: f64,
    pitch: f64,
    yaw: f64,
}

/// Builds a tick-by-tick session script
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    batches: Vec<Vec<SensorEvent>>,
    attitude: Attitude,
    jitter: Option<(f64, StdRng)>,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Starts at the center of bucket 9 on every axis
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
            attitude: Attitude {
                roll: full_turn_angle(9),
                pitch: pitch_angle(9),
                yaw: full_turn_angle(9),
            },
            jitter: None,
        }
    }

    /// Add uniform noise of up to `amplitude` radians to every streamed sample
    pub fn with_jitter(mut self, amplitude: f64, seed: u64) -> Self {
        self.jitter = Some((amplitude, StdRng::seed_from_u64(seed)));
        self
    }

    /// One tick: the current orientation followed by `events`
    pub fn tick(mut self, events: impl IntoIterator<Item = SensorEvent>) -> Self {
        let sample = self.sample();
        let mut batch = vec![sample];
        batch.extend(events);
        self.batches.push(batch);
        self
    }

    /// `ticks` ticks holding the current attitude
    pub fn hold(mut self, ticks: usize) -> Self {
        for _ in 0..ticks {
            self = self.tick([]);
        }
        self
    }

    /// One tick carrying a pose report
    pub fn pose(self, pose: Pose) -> Self {
        self.tick([SensorEvent::Pose { pose }])
    }

    /// One tick carrying a non-orientation event
    pub fn event(self, event: SensorEvent) -> Self {
        self.tick([event])
    }

    /// One tick with no events at all (device silent)
    pub fn silence(mut self, ticks: usize) -> Self {
        self.batches.extend(std::iter::repeat_with(Vec::new).take(ticks));
        self
    }

    /// Move linearly to the target attitude over `ticks` ticks
    pub fn sweep_to(mut self, roll: f64, pitch: f64, yaw: f64, ticks: usize) -> Self {
        let from = self.attitude;
        let steps = ticks.max(1);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            self.attitude = Attitude {
                roll: from.roll + (roll - from.roll) * t,
                pitch: from.pitch + (pitch - from.pitch) * t,
                yaw: from.yaw + (yaw - from.yaw) * t,
            };
            self = self.tick([]);
        }
        self
    }

    /// Sweep to the centers of the given buckets
    pub fn sweep_to_buckets(self, roll: u8, pitch: u8, yaw: u8, ticks: usize) -> Self {
        self.sweep_to(
            full_turn_angle(roll),
            pitch_angle(pitch),
            full_turn_angle(yaw),
            ticks,
        )
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn build(self, name: impl Into<String>) -> MockEventSource {
        MockEventSource::new(name, self.batches)
    }

    fn sample(&mut self) -> SensorEvent {
        let Attitude { roll, pitch, yaw } = self.attitude;
        match self.jitter.as_mut() {
            Some((amplitude, rng)) if *amplitude > 0.0 => {
                let a = *amplitude;
                orientation(
                    roll + rng.random_range(-a..=a),
                    pitch + rng.random_range(-a..=a),
                    yaw + rng.random_range(-a..=a),
                )
            }
            _ => orientation(roll, pitch, yaw),
        }
    }
}

/// Replays a pre-built script one batch per tick
#[derive(Debug, Clone)]
pub struct MockEventSource {
    name: String,
    batches: VecDeque<Vec<SensorEvent>>,
    total: usize,
}

impl MockEventSource {
    pub fn new(name: impl Into<String>, batches: Vec<Vec<SensorEvent>>) -> Self {
        let name = name.into();
        debug!(source = %name, ticks = batches.len(), "mock event source created");
        Self {
            name,
            total: batches.len(),
            batches: batches.into(),
        }
    }

    /// Full tour of the navigator
    ///
    /// Syncs and unlocks, opens the message list, tilts forward two items,
    /// confirms, opens the emoji list, tilts back, cancels, then records one
    /// yaw-dominated gesture and goes idle.
    pub fn demo() -> Self {
        ScenarioBuilder::new()
            .with_jitter(0.01, 7)
            .event(SensorEvent::ArmSync {
                arm: Arm::Left,
                direction: XDirection::TowardWrist,
            })
            .event(SensorEvent::Unlock)
            .hold(10)
            // message list, forward two items
            .pose(Pose::WaveIn)
            .pose(Pose::Rest)
            .sweep_to_buckets(9, 13, 9, 3)
            .hold(8)
            .sweep_to_buckets(9, 9, 9, 3)
            .hold(4)
            .pose(Pose::FingersSpread)
            .pose(Pose::Rest)
            .hold(10)
            // emoji list, back one item, leave
            .pose(Pose::WaveOut)
            .pose(Pose::Rest)
            .sweep_to_buckets(9, 4, 9, 3)
            .hold(2)
            .sweep_to_buckets(9, 9, 9, 3)
            .pose(Pose::Fist)
            .pose(Pose::Rest)
            .hold(10)
            // gesture: out, across, back
            .pose(Pose::DoubleTap)
            .pose(Pose::Rest)
            .hold(4)
            .sweep_to_buckets(9, 9, 13, 3)
            .hold(14)
            .sweep_to_buckets(9, 9, 4, 4)
            .hold(14)
            .sweep_to_buckets(9, 9, 9, 3)
            .hold(14)
            .event(SensorEvent::Lock)
            .hold(5)
            .build("demo")
    }

    /// Ticks not yet delivered
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl EventSource for MockEventSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_batch(&mut self) -> Option<Vec<SensorEvent>> {
        let batch = self.batches.pop_front()?;
        trace!(
            source = %self.name,
            tick = self.total - self.batches.len(),
            events = batch.len(),
            "mock batch delivered"
        );
        Some(batch)
    }
}
