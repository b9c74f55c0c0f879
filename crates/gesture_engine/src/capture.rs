//! Three-segment gesture capture.

use contracts::{
    CaptureConfig, CoreError, Gesture, MotionSegment, OrientationBuckets, SEGMENTS_PER_GESTURE,
};
use tracing::{debug, instrument, warn};

use crate::motion::MotionRecorder;

/// Capture phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    /// Recording segment `index`
    Recording { index: usize },
    /// Between segments; segment `next` starts at `resume_at_ms`
    Pausing { next: usize, resume_at_ms: u64 },
    /// All segments recorded
    Complete,
}

/// Outcome of one capture step
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureStep {
    /// Nothing finalized this step
    Waiting,
    /// A non-final segment finished
    SegmentRecorded { index: usize, segment: MotionSegment },
    /// The final segment finished; the gesture is unlabeled
    Completed { segment: MotionSegment, gesture: Gesture },
}

/// Sequences motion recordings with a pause between them
#[derive(Debug, Clone)]
pub struct GestureCapture {
    config: CaptureConfig,
    recorder: MotionRecorder,
    segments: Vec<MotionSegment>,
    phase: CapturePhase,
}

impl GestureCapture {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            config: config.clone(),
            recorder: MotionRecorder::new(config),
            segments: Vec::with_capacity(SEGMENTS_PER_GESTURE),
            phase: CapturePhase::Recording { index: 0 },
        }
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// Segments finished so far
    pub fn completed_segments(&self) -> usize {
        self.segments.len()
    }

    /// Discard every in-flight segment and start over from the first one
    pub fn cancel(&mut self) {
        if !self.segments.is_empty() {
            debug!(discarded = self.segments.len(), "discarding partial gesture");
        }
        self.segments.clear();
        self.recorder.reset();
        self.phase = CapturePhase::Recording { index: 0 };
    }

    /// Advance with this tick's buckets
    ///
    /// A segment timeout abandons the whole gesture: the capture is reset to
    /// the first segment and `GestureTimeout` is returned.
    #[instrument(level = "trace", name = "gesture_capture_step", skip(self))]
    pub fn step(
        &mut self,
        buckets: OrientationBuckets,
        now_ms: u64,
    ) -> Result<CaptureStep, CoreError> {
        let index = match self.phase {
            CapturePhase::Complete => return Ok(CaptureStep::Waiting),
            CapturePhase::Pausing { next, resume_at_ms } => {
                if now_ms < resume_at_ms {
                    return Ok(CaptureStep::Waiting);
                }
                self.recorder = MotionRecorder::new(&self.config);
                self.phase = CapturePhase::Recording { index: next };
                next
            }
            CapturePhase::Recording { index } => index,
        };

        let segment = match self.recorder.step(buckets, now_ms) {
            Ok(Some(segment)) => segment,
            Ok(None) => return Ok(CaptureStep::Waiting),
            Err(CoreError::MotionTimeout { waited_ms }) => {
                warn!(segment = index, waited_ms, "segment timed out, abandoning gesture");
                self.cancel();
                return Err(CoreError::GestureTimeout {
                    segment: index,
                    waited_ms,
                });
            }
            Err(err) => return Err(err),
        };

        self.segments.push(segment);

        if self.segments.len() < SEGMENTS_PER_GESTURE {
            let resume_at_ms = now_ms + self.config.segment_pause_ms;
            self.phase = CapturePhase::Pausing {
                next: index + 1,
                resume_at_ms,
            };
            debug!(index, resume_at_ms, "segment recorded");
            return Ok(CaptureStep::SegmentRecorded { index, segment });
        }

        let segments: [MotionSegment; SEGMENTS_PER_GESTURE] =
            match std::mem::take(&mut self.segments).try_into() {
                Ok(segments) => segments,
                Err(partial) => {
                    // Unreachable: pushes stop at SEGMENTS_PER_GESTURE.
                    self.segments = partial;
                    return Ok(CaptureStep::Waiting);
                }
            };
        self.phase = CapturePhase::Complete;
        debug!("gesture capture complete");

        Ok(CaptureStep::Completed {
            segment,
            gesture: Gesture::new(segments),
        })
    }
}
