//! OrientationBuckets - quantizer output

use serde::{Deserialize, Serialize};

/// Number of buckets per axis
pub const BUCKET_COUNT: u8 = 18;

/// Euler decomposition of an orientation sample (radians)
///
/// roll ∈ [−π, π], pitch ∈ [−π/2, π/2], yaw ∈ [−π, π]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// Coarse orientation, each axis in `[0, BUCKET_COUNT)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrientationBuckets {
    pub roll: u8,
    pub pitch: u8,
    pub yaw: u8,
}

impl OrientationBuckets {
    pub fn new(roll: u8, pitch: u8, yaw: u8) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Signed per-axis difference `self − origin`, not wrapped
    pub fn delta_from(&self, origin: &OrientationBuckets) -> BucketDelta {
        BucketDelta {
            roll: i16::from(self.roll) - i16::from(origin.roll),
            pitch: i16::from(self.pitch) - i16::from(origin.pitch),
            yaw: i16::from(self.yaw) - i16::from(origin.yaw),
        }
    }
}

/// Signed per-axis bucket difference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDelta {
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
}

impl BucketDelta {
    pub fn new(roll: i16, pitch: i16, yaw: i16) -> Self {
        Self { roll, pitch, yaw }
    }

    /// True once any axis moved by at least `threshold` buckets
    pub fn exceeds(&self, threshold: u8) -> bool {
        let threshold = u16::from(threshold);
        self.roll.unsigned_abs() >= threshold
            || self.pitch.unsigned_abs() >= threshold
            || self.yaw.unsigned_abs() >= threshold
    }

    /// |Δpitch| + |Δroll|
    pub fn planar(&self) -> u16 {
        self.pitch
            .unsigned_abs()
            .saturating_add(self.roll.unsigned_abs())
    }

    /// |Δyaw|
    pub fn axial(&self) -> u16 {
        self.yaw.unsigned_abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_signed_and_unwrapped() {
        let origin = OrientationBuckets::new(17, 9, 0);
        let end = OrientationBuckets::new(0, 12, 17);
        let delta = end.delta_from(&origin);
        assert_eq!(delta, BucketDelta::new(-17, 3, 17));
    }

    #[test]
    fn test_delta_spans_full_byte_range() {
        let low = OrientationBuckets::new(127, 0, 255);
        let high = OrientationBuckets::new(128, 255, 0);
        assert_eq!(high.delta_from(&low), BucketDelta::new(1, 255, -255));
        assert_eq!(low.delta_from(&high), BucketDelta::new(-1, -255, 255));
    }

    #[test]
    fn test_exceeds_checks_each_axis_independently() {
        assert!(!BucketDelta::new(2, -2, 2).exceeds(3));
        assert!(BucketDelta::new(-3, 0, 0).exceeds(3));
        assert!(BucketDelta::new(0, 0, 4).exceeds(3));
    }

    #[test]
    fn test_planar_and_axial() {
        let delta = BucketDelta::new(-1, 1, -5);
        assert_eq!(delta.planar(), 2);
        assert_eq!(delta.axial(), 5);
    }
}
