//! TickReport - engine output for one tick

use crate::{CoreError, DeviceCommand, Gesture, MenuMode, MotionSegment};

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Menu switched modes
    MenuChanged { from: MenuMode, to: MenuMode },

    /// Cursor moved inside a list; `delay_ms` is the scroll gate that applied
    CursorMoved {
        mode: MenuMode,
        index: usize,
        delay_ms: u64,
    },

    /// Confirm pose finalized the item under the cursor
    SelectionMade { mode: MenuMode, index: usize },

    /// A gesture capture was requested; sampling starts next tick
    CaptureStarted,

    /// One segment of the running capture finished
    SegmentRecorded { index: usize, segment: MotionSegment },

    /// All segments captured and classified
    GestureRecognized { gesture: Gesture },

    /// In-flight capture discarded without classification
    CaptureCancelled,

    /// Recoverable fault
    Fault(CoreError),
}

/// Everything one tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick sequence number (monotonically increasing, starts at 1)
    pub tick: u64,

    /// Engine clock after this tick (milliseconds)
    pub now_ms: u64,

    /// Number of inbound events consumed
    pub events_in: usize,

    /// Commands to forward to the device
    pub commands: Vec<DeviceCommand>,

    /// Engine events in emission order
    pub events: Vec<EngineEvent>,
}

impl TickReport {
    /// Selections made this tick
    pub fn selections(&self) -> impl Iterator<Item = (MenuMode, usize)> + '_ {
        self.events.iter().filter_map(|event| match event {
            EngineEvent::SelectionMade { mode, index } => Some((*mode, *index)),
            _ => None,
        })
    }

    /// Faults raised this tick
    pub fn faults(&self) -> impl Iterator<Item = &CoreError> + '_ {
        self.events.iter().filter_map(|event| match event {
            EngineEvent::Fault(err) => Some(err),
            _ => None,
        })
    }

    /// Gesture recognized this tick, if any
    pub fn gesture(&self) -> Option<&Gesture> {
        self.events.iter().find_map(|event| match event {
            EngineEvent::GestureRecognized { gesture } => Some(gesture),
            _ => None,
        })
    }
}
