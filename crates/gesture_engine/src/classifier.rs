//! Two-class gesture labeling.

use contracts::{Gesture, GestureLabel};

/// Label a gesture from its middle segment
///
/// The first and last segments are setup and return motion and are never consulted.
pub fn classify(gesture: &Gesture) -> GestureLabel {
    let delta = gesture.middle().delta;
    if delta.planar() < delta.axial() {
        GestureLabel::Wave
    } else {
        GestureLabel::Slice
    }
}

/// Classify and store the label on the gesture
pub fn label(gesture: &mut Gesture) -> GestureLabel {
    let label = classify(gesture);
    gesture.label = Some(label);
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{BucketDelta, MotionSegment, OrientationBuckets};
    use rand::Rng;

    fn segment(roll: i16, pitch: i16, yaw: i16) -> MotionSegment {
        MotionSegment {
            start: OrientationBuckets::default(),
            origin: OrientationBuckets::new(9, 9, 9),
            delta: BucketDelta::new(roll, pitch, yaw),
        }
    }

    fn gesture(middle: MotionSegment) -> Gesture {
        Gesture::new([segment(0, 0, 0), middle, segment(0, 0, 0)])
    }

    #[test]
    fn test_yaw_dominated_middle_is_wave() {
        assert_eq!(classify(&gesture(segment(1, 1, 5))), GestureLabel::Wave);
        assert_eq!(classify(&gesture(segment(0, 0, -4))), GestureLabel::Wave);
    }

    #[test]
    fn test_planar_dominated_middle_is_slice() {
        assert_eq!(classify(&gesture(segment(3, -4, 2))), GestureLabel::Slice);
    }

    #[test]
    fn test_tie_is_slice() {
        assert_eq!(classify(&gesture(segment(2, -2, 4))), GestureLabel::Slice);
        assert_eq!(classify(&gesture(segment(0, 0, 0))), GestureLabel::Slice);
    }

    #[test]
    fn test_only_middle_segment_matters() {
        let mut rng = rand::rng();
        let middle = segment(1, 0, -6);
        let expected = classify(&gesture(middle));

        for _ in 0..500 {
            let mut random = || {
                segment(
                    rng.random_range(-17..=17),
                    rng.random_range(-17..=17),
                    rng.random_range(-17..=17),
                )
            };
            let outer = Gesture::new([random(), middle, random()]);
            assert_eq!(classify(&outer), expected);
        }
    }

    #[test]
    fn test_label_stores_result() {
        let mut g = gesture(segment(0, 6, 1));
        assert_eq!(label(&mut g), GestureLabel::Slice);
        assert_eq!(g.label, Some(GestureLabel::Slice));
    }
}
