//! Tilt-driven menu navigator.
//!
//! Poses are edge-triggered: a pose acts once when it starts, not on every
//! tick it is held. Pitch scrolls the cursor of the open list, gated by a
//! minimum interval that shrinks the further the wrist is tilted.

use std::num::NonZeroUsize;

use contracts::{CoreError, EngineEvent, MenuConfig, MenuListConfig, MenuMode, Pose};
use metrics::histogram;
use tracing::{debug, info};

use crate::state::SensorState;

/// Pitch buckets above this scroll forward
pub const SCROLL_UP_ABOVE: u8 = 10;

/// Pitch buckets below this scroll back
pub const SCROLL_DOWN_BELOW: u8 = 7;

/// Pitch bucket the scroll delay curve is centered on
const SCROLL_CENTER: u8 = 8;

/// Minimum interval between cursor moves at a given pitch bucket
///
/// `4200 / ((|pitch − 8| + 1)^1.5 + 5)`, truncated to whole milliseconds.
pub fn scroll_delay_ms(pitch: u8) -> u64 {
    let distance = f64::from(pitch.abs_diff(SCROLL_CENTER)) + 1.0;
    (4200.0 / (distance.powf(1.5) + 5.0)) as u64
}

/// Cursor that can only hold an index inside its list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedCursor {
    index: usize,
    len: NonZeroUsize,
}

impl BoundedCursor {
    pub fn new(index: usize, len: usize) -> Result<Self, CoreError> {
        match NonZeroUsize::new(len) {
            Some(len) if index < len.get() => Ok(Self { index, len }),
            _ => Err(CoreError::CursorOutOfRange { index, len }),
        }
    }

    /// Cursor on the middle item (`(len − 1) / 2`)
    pub fn midpoint(len: NonZeroUsize) -> Self {
        Self {
            index: (len.get() - 1) / 2,
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Move forward one item; false at the last item
    pub fn step_forward(&mut self) -> bool {
        if self.index + 1 < self.len.get() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move back one item; false at the first item
    pub fn step_back(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }
}

/// Mode plus cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub mode: MenuMode,
    pub cursor: BoundedCursor,
}

/// Menu state machine
#[derive(Debug, Clone)]
pub struct MenuNavigator {
    config: MenuConfig,
    list_a_len: NonZeroUsize,
    list_b_len: NonZeroUsize,
    state: MenuState,
    last_pose: Pose,
    last_move_ms: Option<u64>,
}

impl MenuNavigator {
    /// Fails with `CursorOutOfRange` when either list is empty
    pub fn new(config: MenuConfig) -> Result<Self, CoreError> {
        let list_a_len = non_empty(&config.list_a)?;
        let list_b_len = non_empty(&config.list_b)?;

        Ok(Self {
            config,
            list_a_len,
            list_b_len,
            state: MenuState {
                mode: MenuMode::Main,
                cursor: BoundedCursor::midpoint(list_a_len),
            },
            last_pose: Pose::None,
            last_move_ms: None,
        })
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn mode(&self) -> MenuMode {
        self.state.mode
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// List shown in `mode`, if any
    pub fn list(&self, mode: MenuMode) -> Option<&MenuListConfig> {
        match mode {
            MenuMode::Main => None,
            MenuMode::ListA => Some(&self.config.list_a),
            MenuMode::ListB => Some(&self.config.list_b),
        }
    }

    /// Label of `index` in the list shown in `mode`
    pub fn item(&self, mode: MenuMode, index: usize) -> Option<&str> {
        self.list(mode)?.items.get(index).map(String::as_str)
    }

    /// Label under the cursor, when a list is open
    pub fn selected_item(&self) -> Option<&str> {
        self.item(self.state.mode, self.state.cursor.index())
    }

    /// Back to Main with a fresh cursor
    ///
    /// The last seen pose is kept so a pose held across the reset does not fire again.
    pub fn reset(&mut self) {
        self.state = MenuState {
            mode: MenuMode::Main,
            cursor: BoundedCursor::midpoint(self.list_a_len),
        };
        self.last_move_ms = None;
    }

    /// Advance one tick against the already-updated sensor state
    pub fn step(&mut self, sensor: &SensorState, now_ms: u64, events: &mut Vec<EngineEvent>) {
        let pose_started = sensor.pose != self.last_pose;
        self.last_pose = sensor.pose;

        if pose_started && self.on_pose(sensor.pose, events) {
            return;
        }

        if self.state.mode.is_list() {
            self.scroll(sensor.buckets.pitch, now_ms, events);
        }
    }

    /// Returns true when the pose changed the menu
    fn on_pose(&mut self, pose: Pose, events: &mut Vec<EngineEvent>) -> bool {
        let mode = self.state.mode;

        if pose == self.config.open_list_a_pose {
            return self.enter(MenuMode::ListA, events);
        }
        if pose == self.config.open_list_b_pose {
            return self.enter(MenuMode::ListB, events);
        }
        if !mode.is_list() {
            return false;
        }

        if pose == self.config.confirm_pose {
            let index = self.state.cursor.index();
            info!(
                mode = %mode,
                index,
                item = self.item(mode, index).unwrap_or_default(),
                "selection made"
            );
            events.push(EngineEvent::SelectionMade { mode, index });
            self.enter(MenuMode::Main, events)
        } else if pose == self.config.cancel_pose {
            self.enter(MenuMode::Main, events)
        } else {
            false
        }
    }

    /// Switch modes; re-entering the current mode changes nothing
    fn enter(&mut self, to: MenuMode, events: &mut Vec<EngineEvent>) -> bool {
        let from = self.state.mode;
        if from == to {
            return false;
        }

        let len = match to {
            MenuMode::ListB => self.list_b_len,
            MenuMode::Main | MenuMode::ListA => self.list_a_len,
        };
        self.state = MenuState {
            mode: to,
            cursor: BoundedCursor::midpoint(len),
        };
        self.last_move_ms = None;

        debug!(%from, %to, "menu changed");
        events.push(EngineEvent::MenuChanged { from, to });
        true
    }

    fn scroll(&mut self, pitch: u8, now_ms: u64, events: &mut Vec<EngineEvent>) {
        let forward = if pitch > SCROLL_UP_ABOVE {
            true
        } else if pitch < SCROLL_DOWN_BELOW {
            false
        } else {
            return;
        };

        let delay_ms = scroll_delay_ms(pitch);
        if let Some(last) = self.last_move_ms {
            if now_ms.saturating_sub(last) < delay_ms {
                return;
            }
        }

        let cursor = &mut self.state.cursor;
        let moved = if forward {
            cursor.step_forward()
        } else {
            cursor.step_back()
        };
        if !moved {
            return;
        }

        self.last_move_ms = Some(now_ms);
        histogram!("armband_scroll_delay_ms").record(delay_ms as f64);
        events.push(EngineEvent::CursorMoved {
            mode: self.state.mode,
            index: cursor.index(),
            delay_ms,
        });
    }
}

fn non_empty(list: &MenuListConfig) -> Result<NonZeroUsize, CoreError> {
    NonZeroUsize::new(list.items.len())
        .ok_or(CoreError::CursorOutOfRange { index: 0, len: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::OrientationBuckets;

    struct Harness {
        nav: MenuNavigator,
        sensor: SensorState,
        now: u64,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                nav: MenuNavigator::new(MenuConfig::default()).unwrap(),
                sensor: SensorState::default(),
                now: 0,
            }
        }

        fn tick(&mut self, pose: Pose, pitch: u8) -> Vec<EngineEvent> {
            self.now += 50;
            self.sensor.pose = pose;
            self.sensor.buckets = OrientationBuckets::new(9, pitch, 9);
            let mut events = Vec::new();
            self.nav.step(&self.sensor, self.now, &mut events);
            events
        }

        fn cursor(&self) -> usize {
            self.nav.state().cursor.index()
        }
    }

    #[test]
    fn test_scroll_delay_curve() {
        assert_eq!(scroll_delay_ms(8), 700);
        assert_eq!(scroll_delay_ms(12), 259);
        assert_eq!(scroll_delay_ms(4), 259);
        assert_eq!(scroll_delay_ms(17), 114);
        assert_eq!(scroll_delay_ms(0), 131);
    }

    #[test]
    fn test_cursor_construction_is_checked() {
        assert!(BoundedCursor::new(10, 11).is_ok());
        assert_eq!(
            BoundedCursor::new(11, 11),
            Err(CoreError::CursorOutOfRange { index: 11, len: 11 })
        );
        assert!(BoundedCursor::new(0, 0).is_err());
        assert_eq!(BoundedCursor::midpoint(NonZeroUsize::new(11).unwrap()).index(), 5);
        assert_eq!(BoundedCursor::midpoint(NonZeroUsize::new(1).unwrap()).index(), 0);
    }

    #[test]
    fn test_empty_list_rejected() {
        let mut config = MenuConfig::default();
        config.list_b.items.clear();
        assert!(MenuNavigator::new(config).is_err());
    }

    #[test]
    fn test_open_list_resets_cursor_to_midpoint() {
        let mut h = Harness::new();
        let events = h.tick(Pose::WaveIn, 9);
        assert_eq!(
            events,
            vec![EngineEvent::MenuChanged {
                from: MenuMode::Main,
                to: MenuMode::ListA
            }]
        );
        assert_eq!(h.cursor(), 5);
        assert_eq!(h.nav.selected_item(), Some("6a"));
    }

    #[test]
    fn test_held_pose_fires_once() {
        let mut h = Harness::new();
        h.tick(Pose::WaveIn, 9);
        h.tick(Pose::Rest, 9);
        h.tick(Pose::FingersSpread, 9);
        assert_eq!(h.nav.mode(), MenuMode::Main);

        // still holding the confirm pose: nothing happens in Main
        for _ in 0..5 {
            assert!(h.tick(Pose::FingersSpread, 9).is_empty());
        }
    }

    #[test]
    fn test_tilt_scroll_respects_gate() {
        let mut h = Harness::new();
        h.tick(Pose::WaveIn, 9);

        // first move is immediate, the next waits 259ms
        let events = h.tick(Pose::WaveIn, 12);
        assert_eq!(
            events,
            vec![EngineEvent::CursorMoved {
                mode: MenuMode::ListA,
                index: 6,
                delay_ms: 259
            }]
        );
        let moved_at = h.now;
        assert!(h.tick(Pose::WaveIn, 12).is_empty());
        assert!(h.tick(Pose::WaveIn, 12).is_empty());
        assert_eq!(h.cursor(), 6);

        while h.now + 50 < moved_at + 259 {
            assert!(h.tick(Pose::WaveIn, 12).is_empty());
        }
        let events = h.tick(Pose::WaveIn, 12);
        assert_eq!(h.now - moved_at, 300);
        assert!(matches!(events[..], [EngineEvent::CursorMoved { index: 7, .. }]));
    }

    #[test]
    fn test_dead_zone_holds_cursor() {
        let mut h = Harness::new();
        h.tick(Pose::WaveOut, 9);
        for pitch in 7..=10 {
            for _ in 0..30 {
                assert!(h.tick(Pose::Rest, pitch).is_empty());
            }
        }
        assert_eq!(h.cursor(), 5);
    }

    #[test]
    fn test_cursor_saturates_at_bounds() {
        let mut h = Harness::new();
        h.tick(Pose::WaveIn, 9);
        for _ in 0..200 {
            h.tick(Pose::Rest, 17);
        }
        assert_eq!(h.cursor(), 10);
        for _ in 0..400 {
            h.tick(Pose::Rest, 0);
            assert!(h.cursor() < 11);
        }
        assert_eq!(h.cursor(), 0);
    }

    #[test]
    fn test_confirm_emits_single_selection_and_returns_to_main() {
        let mut h = Harness::new();
        h.tick(Pose::WaveIn, 9);
        // scroll down to index 3
        while h.cursor() > 3 {
            h.tick(Pose::Rest, 3);
        }
        let events = h.tick(Pose::FingersSpread, 9);
        assert_eq!(
            events,
            vec![
                EngineEvent::SelectionMade {
                    mode: MenuMode::ListA,
                    index: 3
                },
                EngineEvent::MenuChanged {
                    from: MenuMode::ListA,
                    to: MenuMode::Main
                },
            ]
        );
        assert_eq!(h.nav.mode(), MenuMode::Main);
        assert!(h.tick(Pose::FingersSpread, 9).is_empty());
    }

    #[test]
    fn test_cancel_leaves_list_without_selection() {
        let mut h = Harness::new();
        h.tick(Pose::WaveOut, 9);
        let events = h.tick(Pose::Fist, 9);
        assert_eq!(
            events,
            vec![EngineEvent::MenuChanged {
                from: MenuMode::ListB,
                to: MenuMode::Main
            }]
        );
        // fist in Main does nothing
        h.tick(Pose::Rest, 9);
        assert!(h.tick(Pose::Fist, 9).is_empty());
    }

    #[test]
    fn test_switch_between_lists_is_exclusive() {
        let mut h = Harness::new();
        h.tick(Pose::WaveIn, 9);
        h.tick(Pose::Rest, 14);
        assert_eq!(h.cursor(), 6);

        let events = h.tick(Pose::WaveOut, 14);
        assert_eq!(
            events,
            vec![EngineEvent::MenuChanged {
                from: MenuMode::ListA,
                to: MenuMode::ListB
            }]
        );
        assert_eq!(h.cursor(), 5);

        // re-opening the same list keeps the cursor
        h.tick(Pose::Rest, 14);
        assert_eq!(h.cursor(), 6);
        h.tick(Pose::Rest, 9);
        assert!(h.tick(Pose::WaveOut, 9).is_empty());
        assert_eq!(h.cursor(), 6);
    }

    #[test]
    fn test_reset_returns_to_main() {
        let mut h = Harness::new();
        h.tick(Pose::WaveOut, 9);
        h.tick(Pose::Rest, 14);
        h.nav.reset();
        assert_eq!(h.nav.mode(), MenuMode::Main);
        assert_eq!(h.cursor(), 5);
        assert_eq!(h.nav.selected_item(), None);
        assert_eq!(h.nav.item(MenuMode::ListB, 0), Some("1"));
    }
}
