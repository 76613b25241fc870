use std::time::Instant;

/// Events FROM the input thread TO the menu logic (via the event queue)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A key changed state. Only presses are queued.
    Key { code: u16, pressed: bool },

    /// A touch contact update
    Touch(TouchEvent),
}

/// Stage of a single-contact touch interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Drag,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: i32,
    pub y: i32,
    pub time: Instant,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, x: i32, y: i32, time: Instant) -> Self {
        Self { phase, x, y, time }
    }
}

impl UiEvent {
    pub fn key_down(code: u16) -> Self {
        Self::Key { code, pressed: true }
    }

    pub fn is_key_press(&self) -> bool {
        matches!(self, Self::Key { pressed: true, .. })
    }
}
