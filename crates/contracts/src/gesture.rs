//! Gesture - capture pipeline output

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BucketDelta, OrientationBuckets};

/// Segments making up one gesture
pub const SEGMENTS_PER_GESTURE: usize = 3;

/// One finalized motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionSegment {
    /// Buckets sampled when the segment was armed
    pub start: OrientationBuckets,

    /// Buckets sampled one tick later; deltas are measured from here
    pub origin: OrientationBuckets,

    /// `final − origin` per axis
    pub delta: BucketDelta,
}

/// Discrete gesture label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureLabel {
    /// Dominated by rotation about the forearm
    Wave,
    /// Dominated by pitch/roll sweep
    Slice,
}

impl GestureLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            GestureLabel::Wave => "WAVE",
            GestureLabel::Slice => "SLICE",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three sequential segments, labeled once classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gesture {
    pub segments: [MotionSegment; SEGMENTS_PER_GESTURE],
    pub label: Option<GestureLabel>,
}

impl Gesture {
    /// Unlabeled gesture
    pub fn new(segments: [MotionSegment; SEGMENTS_PER_GESTURE]) -> Self {
        Self {
            segments,
            label: None,
        }
    }

    /// The segment the classifier inspects
    pub fn middle(&self) -> &MotionSegment {
        &self.segments[SEGMENTS_PER_GESTURE / 2]
    }
}
