//! Current sensor state, mutated only by inbound events.

use contracts::{
    Arm, CoreError, DeviceCommand, LockState, OrientationBuckets, Pose, Quaternion, SensorEvent,
    UnlockMode, XDirection,
};
use tracing::debug;

use crate::quantizer::quantize_quaternion;

/// Latest known device state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorState {
    /// Quantized orientation
    pub buckets: OrientationBuckets,

    /// Most recent pose report
    pub pose: Pose,

    /// Device is synced to an arm
    pub arm_present: bool,

    /// Arm from the last sync, kept after unsync for display
    pub which_arm: Option<Arm>,

    /// Orientation of the device on the arm
    pub x_direction: Option<XDirection>,

    pub lock: LockState,
}

impl SensorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one inbound event
    ///
    /// Commands the event implies for the device are appended to `commands`.
    /// A rejected orientation sample leaves the state untouched.
    pub fn apply(
        &mut self,
        event: &SensorEvent,
        commands: &mut Vec<DeviceCommand>,
    ) -> Result<(), CoreError> {
        match *event {
            SensorEvent::Orientation { quat } => self.on_orientation(&quat)?,
            SensorEvent::Pose { pose } => self.on_pose(pose, commands),
            SensorEvent::ArmSync { arm, direction } => self.on_arm_sync(arm, direction),
            SensorEvent::ArmUnsync => self.on_arm_unsync(),
            SensorEvent::Lock => self.lock = LockState::Locked,
            SensorEvent::Unlock => self.lock = LockState::Unlocked,
            SensorEvent::Unpair => self.on_unpair(),
        }
        Ok(())
    }

    fn on_orientation(&mut self, quat: &Quaternion) -> Result<(), CoreError> {
        self.buckets = quantize_quaternion(quat)?;
        Ok(())
    }

    fn on_pose(&mut self, pose: Pose, commands: &mut Vec<DeviceCommand>) {
        self.pose = pose;

        if pose.is_gesture() {
            // Stay unlocked while the pose is held, and confirm with a vibration.
            commands.push(DeviceCommand::RequestUnlock {
                mode: UnlockMode::Held,
            });
            commands.push(DeviceCommand::NotifyAction);
        } else {
            commands.push(DeviceCommand::RequestUnlock {
                mode: UnlockMode::Timed,
            });
        }
    }

    fn on_arm_sync(&mut self, arm: Arm, direction: XDirection) {
        debug!(?arm, ?direction, "arm synced");
        self.arm_present = true;
        self.which_arm = Some(arm);
        self.x_direction = Some(direction);
    }

    fn on_arm_unsync(&mut self) {
        debug!("arm unsynced");
        self.arm_present = false;
    }

    fn on_unpair(&mut self) {
        debug!("device unpaired, clearing sensor state");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: &mut SensorState, event: SensorEvent) -> Vec<DeviceCommand> {
        let mut commands = Vec::new();
        state.apply(&event, &mut commands).unwrap();
        commands
    }

    #[test]
    fn test_orientation_updates_buckets() {
        let mut state = SensorState::new();
        apply(
            &mut state,
            SensorEvent::Orientation {
                quat: Quaternion::IDENTITY,
            },
        );
        assert_eq!(state.buckets, OrientationBuckets::new(9, 9, 9));
    }

    #[test]
    fn test_invalid_orientation_keeps_prior_buckets() {
        let mut state = SensorState::new();
        state.buckets = OrientationBuckets::new(3, 4, 5);
        let mut commands = Vec::new();
        let result = state.apply(
            &SensorEvent::Orientation {
                quat: Quaternion::new(f64::NAN, 0.0, 0.0, 0.0),
            },
            &mut commands,
        );
        assert!(matches!(result, Err(CoreError::InvalidOrientation { .. })));
        assert_eq!(state.buckets, OrientationBuckets::new(3, 4, 5));
    }

    #[test]
    fn test_gesture_pose_requests_held_unlock_and_notifies() {
        let mut state = SensorState::new();
        let commands = apply(&mut state, SensorEvent::Pose { pose: Pose::Fist });
        assert_eq!(state.pose, Pose::Fist);
        assert_eq!(
            commands,
            vec![
                DeviceCommand::RequestUnlock {
                    mode: UnlockMode::Held
                },
                DeviceCommand::NotifyAction
            ]
        );
    }

    #[test]
    fn test_rest_pose_requests_timed_unlock() {
        let mut state = SensorState::new();
        for pose in [Pose::Rest, Pose::Unknown, Pose::None] {
            let commands = apply(&mut state, SensorEvent::Pose { pose });
            assert_eq!(
                commands,
                vec![DeviceCommand::RequestUnlock {
                    mode: UnlockMode::Timed
                }]
            );
        }
    }

    #[test]
    fn test_arm_sync_and_unsync() {
        let mut state = SensorState::new();
        apply(
            &mut state,
            SensorEvent::ArmSync {
                arm: Arm::Left,
                direction: XDirection::TowardWrist,
            },
        );
        assert!(state.arm_present);
        assert_eq!(state.which_arm, Some(Arm::Left));

        apply(&mut state, SensorEvent::ArmUnsync);
        assert!(!state.arm_present);
    }

    #[test]
    fn test_lock_unlock() {
        let mut state = SensorState::new();
        assert_eq!(state.lock, LockState::Locked);
        apply(&mut state, SensorEvent::Unlock);
        assert_eq!(state.lock, LockState::Unlocked);
        apply(&mut state, SensorEvent::Lock);
        assert_eq!(state.lock, LockState::Locked);
    }

    #[test]
    fn test_unpair_resets_everything() {
        let mut state = SensorState {
            buckets: OrientationBuckets::new(1, 2, 3),
            pose: Pose::WaveIn,
            arm_present: true,
            which_arm: Some(Arm::Right),
            x_direction: Some(XDirection::TowardElbow),
            lock: LockState::Unlocked,
        };
        let commands = apply(&mut state, SensorEvent::Unpair);
        assert!(commands.is_empty());
        assert_eq!(state, SensorState::default());
        assert_eq!(state.buckets, OrientationBuckets::new(0, 0, 0));
    }
}
