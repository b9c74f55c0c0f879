//! Orientation quantization.
//!
//! Quaternion → Euler angles → three buckets in `[0, BUCKET_COUNT)`.

use std::f64::consts::{FRAC_PI_2, PI};

use contracts::{CoreError, EulerAngles, OrientationBuckets, Quaternion, BUCKET_COUNT};

/// Standard roll/pitch/yaw decomposition of a unit quaternion
///
/// The pitch argument is clamped to [−1, 1] so slightly denormalized samples
/// near the poles do not produce NaN.
pub fn quaternion_to_euler(quat: &Quaternion) -> Result<EulerAngles, CoreError> {
    if !quat.is_finite() {
        return Err(CoreError::InvalidOrientation {
            detail: format!(
                "non-finite quaternion (w={}, x={}, y={}, z={})",
                quat.w, quat.x, quat.y, quat.z
            ),
        });
    }

    let Quaternion { w, x, y, z } = *quat;
    let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
    let pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin();
    let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

    Ok(EulerAngles { roll, pitch, yaw })
}

/// Map Euler angles onto buckets
///
/// roll and yaw span 2π starting at −π, pitch spans π starting at −π/2.
pub fn quantize(angles: &EulerAngles) -> Result<OrientationBuckets, CoreError> {
    let EulerAngles { roll, pitch, yaw } = *angles;
    if !(roll.is_finite() && pitch.is_finite() && yaw.is_finite()) {
        return Err(CoreError::InvalidOrientation {
            detail: format!("non-finite angles (roll={roll}, pitch={pitch}, yaw={yaw})"),
        });
    }

    Ok(OrientationBuckets {
        roll: bucket(roll, PI, 2.0 * PI),
        pitch: bucket(pitch, FRAC_PI_2, PI),
        yaw: bucket(yaw, PI, 2.0 * PI),
    })
}

/// Quaternion straight to buckets
pub fn quantize_quaternion(quat: &Quaternion) -> Result<OrientationBuckets, CoreError> {
    quantize(&quaternion_to_euler(quat)?)
}

/// Truncate toward zero, then clamp: the upper domain bound lands on 18 otherwise.
#[inline]
fn bucket(angle: f64, offset: f64, span: f64) -> u8 {
    let scaled = (angle + offset) / span * f64::from(BUCKET_COUNT);
    (scaled.trunc() as i64).clamp(0, i64::from(BUCKET_COUNT) - 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn assert_in_range(buckets: &OrientationBuckets) {
        assert!(buckets.roll < BUCKET_COUNT, "roll {:?}", buckets);
        assert!(buckets.pitch < BUCKET_COUNT, "pitch {:?}", buckets);
        assert!(buckets.yaw < BUCKET_COUNT, "yaw {:?}", buckets);
    }

    #[test]
    fn test_identity_is_domain_midpoint() {
        let buckets = quantize_quaternion(&Quaternion::IDENTITY).unwrap();
        assert_eq!(buckets, OrientationBuckets::new(9, 9, 9));
    }

    #[test]
    fn test_exact_domain_limits_never_reach_18() {
        let upper = EulerAngles {
            roll: PI,
            pitch: FRAC_PI_2,
            yaw: PI,
        };
        assert_eq!(
            quantize(&upper).unwrap(),
            OrientationBuckets::new(17, 17, 17)
        );

        let lower = EulerAngles {
            roll: -PI,
            pitch: -FRAC_PI_2,
            yaw: -PI,
        };
        assert_eq!(quantize(&lower).unwrap(), OrientationBuckets::new(0, 0, 0));
    }

    #[test]
    fn test_out_of_domain_angles_saturate() {
        let angles = EulerAngles {
            roll: 4.0 * PI,
            pitch: -PI,
            yaw: 0.0,
        };
        let buckets = quantize(&angles).unwrap();
        assert_eq!(buckets.roll, 17);
        assert_eq!(buckets.pitch, 0);
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = quantize_quaternion(&Quaternion::new(f64::NAN, 0.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOrientation { .. }));

        let angles = EulerAngles {
            roll: 0.0,
            pitch: f64::INFINITY,
            yaw: 0.0,
        };
        assert!(quantize(&angles).is_err());
    }

    #[test]
    fn test_random_angles_stay_in_range() {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let angles = EulerAngles {
                roll: rng.random_range(-PI..=PI),
                pitch: rng.random_range(-FRAC_PI_2..=FRAC_PI_2),
                yaw: rng.random_range(-PI..=PI),
            };
            assert_in_range(&quantize(&angles).unwrap());
        }
    }

    #[test]
    fn test_random_quaternions_stay_in_range() {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let (w, x, y, z): (f64, f64, f64, f64) = (
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            let norm = (w * w + x * x + y * y + z * z).sqrt().max(1e-9);
            let quat = Quaternion::new(w / norm, x / norm, y / norm, z / norm);
            assert_in_range(&quantize_quaternion(&quat).unwrap());
        }
    }

    #[test]
    fn test_monotonic_per_axis() {
        let steps = 5_000;
        let mut last = OrientationBuckets::new(0, 0, 0);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let angles = EulerAngles {
                roll: -PI + 2.0 * PI * t,
                pitch: -FRAC_PI_2 + PI * t,
                yaw: -PI + 2.0 * PI * t,
            };
            let buckets = quantize(&angles).unwrap();
            assert!(buckets.roll >= last.roll);
            assert!(buckets.pitch >= last.pitch);
            assert!(buckets.yaw >= last.yaw);
            last = buckets;
        }
        assert_eq!(last, OrientationBuckets::new(17, 17, 17));
    }

    #[test]
    fn test_pitch_decomposition() {
        // 90° about y: pitch = +π/2
        let half = std::f64::consts::FRAC_1_SQRT_2;
        let angles = quaternion_to_euler(&Quaternion::new(half, 0.0, half, 0.0)).unwrap();
        assert!((angles.pitch - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(quantize(&angles).unwrap().pitch, 17);
    }
}
