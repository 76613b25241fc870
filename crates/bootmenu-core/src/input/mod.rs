//! Raw input samples and their classification into UI events

mod classifier;
mod keys;

pub use classifier::{Classified, EventClassifier};
pub use keys::KeyTable;

use std::time::Instant;

/// Linux input event codes used by the core
pub mod codes {
    pub const KEY_R: u16 = 19;
    pub const KEY_ENTER: u16 = 28;
    pub const KEY_L: u16 = 38;
    pub const KEY_LEFTALT: u16 = 56;
    pub const KEY_HOME: u16 = 102;
    pub const KEY_UP: u16 = 103;
    pub const KEY_END: u16 = 107;
    pub const KEY_DOWN: u16 = 108;
    pub const KEY_VOLUMEDOWN: u16 = 114;
    pub const KEY_VOLUMEUP: u16 = 115;
    pub const KEY_POWER: u16 = 116;
    pub const KEY_MENU: u16 = 139;
    pub const KEY_BACK: u16 = 158;
    pub const KEY_CAMERA: u16 = 212;
    pub const KEY_SEARCH: u16 = 217;
    pub const BTN_TOUCH: u16 = 0x14a;
    pub const KEY_MAX: u16 = 0x2ff;

    pub const REL_Y: u16 = 0x01;
}

/// Device-level sample category, already decoded by the sample source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Sync,
    Key,
    Relative,
    /// A complete contact report. `RawSample::code` is 0 when the contact lifted.
    Absolute { x: i32, y: i32 },
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub time: Instant,
    pub kind: SampleKind,
    pub code: u16,
    pub value: i32,
}

impl RawSample {
    pub fn key(code: u16, pressed: bool, time: Instant) -> Self {
        Self {
            time,
            kind: SampleKind::Key,
            code,
            value: i32::from(pressed),
        }
    }

    pub fn relative(code: u16, value: i32, time: Instant) -> Self {
        Self {
            time,
            kind: SampleKind::Relative,
            code,
            value,
        }
    }

    pub fn contact(x: i32, y: i32, touching: bool, time: Instant) -> Self {
        Self {
            time,
            kind: SampleKind::Absolute { x, y },
            code: u16::from(touching),
            value: 0,
        }
    }

    pub fn sync(time: Instant) -> Self {
        Self {
            time,
            kind: SampleKind::Sync,
            code: 0,
            value: 0,
        }
    }
}

/// Blocking producer of raw samples. `Ok(None)` signals end of stream.
pub trait SampleSource: Send {
    fn next_sample(&mut self) -> std::io::Result<Option<RawSample>>;
}

/// Device policy consulted by the input thread on every key press
pub trait DeviceHooks: Send + Sync {
    /// Return true if the text display should be toggled
    fn toggle_display(&self, held: &KeyTable, code: u16) -> bool;

    /// Return true if the device should reboot immediately
    fn reboot_now(&self, held: &KeyTable, code: u16) -> bool;

    fn reboot(&self);
}
