//! Terminal status line
//!
//! One line redrawn in place every tick:
//!
//! ```text
//! [*********         ][*************     ][*********         ][unlocked][L][rest          ] messages 8a
//! ```

use std::io::{self, Write};

use contracts::{Arm, LockState, MenuMode, BUCKET_COUNT, SEGMENTS_PER_GESTURE};
use gesture_engine::{SensorState, Snapshot};

const POSE_WIDTH: usize = 14;

fn bar(bucket: u8) -> String {
    let filled = usize::from(bucket.min(BUCKET_COUNT));
    let width = usize::from(BUCKET_COUNT);
    format!("[{}{}]", "*".repeat(filled), " ".repeat(width - filled))
}

/// Orientation bars followed by lock, arm and pose
pub fn sensor_line(sensor: &SensorState) -> String {
    let mut line = String::new();
    line.push_str(&bar(sensor.buckets.roll));
    line.push_str(&bar(sensor.buckets.pitch));
    line.push_str(&bar(sensor.buckets.yaw));

    if sensor.arm_present {
        let lock = match sensor.lock {
            LockState::Unlocked => "unlocked",
            LockState::Locked => "locked  ",
        };
        let arm = match sensor.which_arm {
            Some(Arm::Left) => "L",
            _ => "R",
        };
        line.push_str(&format!(
            "[{lock}][{arm}][{:<width$}]",
            sensor.pose.as_str(),
            width = POSE_WIDTH
        ));
    } else {
        line.push_str(&format!("[{}][?][{}]", " ".repeat(8), " ".repeat(POSE_WIDTH)));
    }
    line
}

/// Full status line: sensor fields plus menu and capture context
pub fn status_line(snapshot: &Snapshot, list_name: Option<&str>) -> String {
    let mut line = sensor_line(&snapshot.sensor);
    match (snapshot.menu.mode, list_name, snapshot.selected_item.as_deref()) {
        (MenuMode::Main, _, _) => line.push_str(" main"),
        (_, Some(name), Some(item)) => line.push_str(&format!(" {name} {item}")),
        (mode, _, _) => line.push_str(&format!(" {mode}")),
    }
    if let Some(capture) = &snapshot.capture {
        line.push_str(&format!(
            " capturing {}/{SEGMENTS_PER_GESTURE}",
            capture.completed_segments
        ));
    }
    line
}

/// Redraws the status line and interleaves one-off messages
pub struct StatusLine<W: Write> {
    out: W,
    enabled: bool,
    drawn: bool,
}

impl StatusLine<io::Stdout> {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            drawn: false,
        }
    }

    pub fn draw(&mut self, line: &str) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        write!(self.out, "\r{line}")?;
        self.out.flush()?;
        self.drawn = true;
        Ok(())
    }

    /// Print a message on its own line below the status line
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        if self.drawn {
            writeln!(self.out)?;
            self.drawn = false;
        }
        writeln!(self.out, "{text}")
    }

    pub fn finish(&mut self) -> io::Result<()> {
        if self.drawn {
            writeln!(self.out)?;
            self.drawn = false;
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{OrientationBuckets, Pose};

    fn synced(buckets: OrientationBuckets, pose: Pose) -> SensorState {
        SensorState {
            buckets,
            pose,
            arm_present: true,
            which_arm: Some(Arm::Left),
            lock: LockState::Unlocked,
            ..SensorState::new()
        }
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar(0), format!("[{}]", " ".repeat(18)));
        assert_eq!(bar(17), format!("[{} ]", "*".repeat(17)));
        assert_eq!(bar(4).len(), 20);
    }

    #[test]
    fn test_sensor_line_on_arm() {
        let line = sensor_line(&synced(OrientationBuckets::new(9, 13, 2), Pose::Fist));
        assert!(line.starts_with("[*********         ][*************     ][**                ]"));
        assert!(line.ends_with("[unlocked][L][fist          ]"), "got: {line}");
    }

    #[test]
    fn test_sensor_line_off_arm() {
        let line = sensor_line(&SensorState::new());
        assert!(line.ends_with("[        ][?][              ]"), "got: {line}");
    }

    #[test]
    fn test_status_line_shows_capture_progress() {
        let mut engine =
            gesture_engine::GestureEngine::new(gesture_engine::EngineConfig::default()).unwrap();
        assert!(!status_line(&engine.snapshot(), None).contains("capturing"));
        engine.begin_capture();
        let line = status_line(&engine.snapshot(), None);
        assert!(line.ends_with(" main capturing 0/3"), "got {line:?}");
    }

    #[test]
    fn test_messages_break_the_status_line() {
        let mut status = StatusLine::new(Vec::new(), true);
        status.draw("[a]").unwrap();
        status.message("Selected 8a").unwrap();
        status.draw("[b]").unwrap();
        status.finish().unwrap();
        let out = String::from_utf8(status.into_inner()).unwrap();
        assert_eq!(out, "\r[a]\nSelected 8a\n\r[b]\n");
    }

    #[test]
    fn test_disabled_status_line_still_prints_messages() {
        let mut status = StatusLine::new(Vec::new(), false);
        status.draw("[a]").unwrap();
        status.message("Gesture: WAVE").unwrap();
        status.finish().unwrap();
        assert_eq!(String::from_utf8(status.into_inner()).unwrap(), "Gesture: WAVE\n");
    }
}
