//! Motion segment recorder.
//!
//! Idle → Armed → Settling → Settled → Done, driven one step per tick.
//! Every wait is a deadline on the engine clock.

use contracts::{CaptureConfig, CoreError, MotionSegment, OrientationBuckets};
use tracing::{debug, trace};

/// Recorder phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Not sampled yet
    Idle,
    /// First sample taken; the origin is sampled on the next step
    Armed { start: OrientationBuckets },
    /// Waiting for any axis to leave the origin by the move threshold
    Settling {
        start: OrientationBuckets,
        origin: OrientationBuckets,
        since_ms: u64,
    },
    /// Threshold crossed; final sample due at `sample_at_ms`
    Settled {
        start: OrientationBuckets,
        origin: OrientationBuckets,
        sample_at_ms: u64,
    },
    /// Finalized
    Done(MotionSegment),
}

/// Records one motion segment by polling the current buckets
#[derive(Debug, Clone)]
pub struct MotionRecorder {
    arming_lag: bool,
    move_threshold: u8,
    settle_delay_ms: u64,
    timeout_ms: u64,
    phase: MotionPhase,
}

impl MotionRecorder {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            arming_lag: config.arming_lag,
            move_threshold: config.move_threshold,
            settle_delay_ms: config.settle_delay_ms,
            timeout_ms: config.segment_timeout_ms,
            phase: MotionPhase::Idle,
        }
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Finalized segment, if any
    pub fn segment(&self) -> Option<MotionSegment> {
        match self.phase {
            MotionPhase::Done(segment) => Some(segment),
            _ => None,
        }
    }

    /// Drop all in-flight state
    pub fn reset(&mut self) {
        self.phase = MotionPhase::Idle;
    }

    /// Advance with this tick's buckets
    ///
    /// Returns the segment on the step that finalizes it. On timeout the
    /// recorder returns to `Idle` so the caller may retry.
    pub fn step(
        &mut self,
        buckets: OrientationBuckets,
        now_ms: u64,
    ) -> Result<Option<MotionSegment>, CoreError> {
        match self.phase {
            MotionPhase::Idle => {
                self.phase = if self.arming_lag {
                    MotionPhase::Armed { start: buckets }
                } else {
                    MotionPhase::Settling {
                        start: buckets,
                        origin: buckets,
                        since_ms: now_ms,
                    }
                };
                trace!(?buckets, "motion recorder armed");
                Ok(None)
            }
            MotionPhase::Armed { start } => {
                self.phase = MotionPhase::Settling {
                    start,
                    origin: buckets,
                    since_ms: now_ms,
                };
                trace!(origin = ?buckets, "motion recorder settling");
                Ok(None)
            }
            MotionPhase::Settling {
                start,
                origin,
                since_ms,
            } => {
                if buckets.delta_from(&origin).exceeds(self.move_threshold) {
                    let sample_at_ms = now_ms + self.settle_delay_ms;
                    self.phase = MotionPhase::Settled {
                        start,
                        origin,
                        sample_at_ms,
                    };
                    debug!(?origin, ?buckets, sample_at_ms, "motion threshold crossed");
                    return self.finalize_if_due(buckets, now_ms);
                }

                let waited_ms = now_ms.saturating_sub(since_ms);
                if waited_ms >= self.timeout_ms {
                    self.phase = MotionPhase::Idle;
                    return Err(CoreError::MotionTimeout { waited_ms });
                }
                Ok(None)
            }
            MotionPhase::Settled { .. } => self.finalize_if_due(buckets, now_ms),
            MotionPhase::Done(_) => Ok(None),
        }
    }

    fn finalize_if_due(
        &mut self,
        buckets: OrientationBuckets,
        now_ms: u64,
    ) -> Result<Option<MotionSegment>, CoreError> {
        let MotionPhase::Settled {
            start,
            origin,
            sample_at_ms,
        } = self.phase
        else {
            return Ok(None);
        };

        if now_ms < sample_at_ms {
            return Ok(None);
        }

        let segment = MotionSegment {
            start,
            origin,
            delta: buckets.delta_from(&origin),
        };
        self.phase = MotionPhase::Done(segment);
        debug!(delta = ?segment.delta, "motion segment finalized");
        Ok(Some(segment))
    }
}
