use std::sync::atomic::{AtomicBool, Ordering};

use super::codes::KEY_MAX;

/// Which keys are currently held down, indexed by key code.
///
/// Written only by the input thread and read from anywhere without locking.
pub struct KeyTable {
    pressed: Vec<AtomicBool>,
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTable {
    pub fn new() -> Self {
        Self {
            pressed: (0..=KEY_MAX).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    pub fn set(&self, code: u16, pressed: bool) {
        if let Some(slot) = self.pressed.get(code as usize) {
            slot.store(pressed, Ordering::Relaxed);
        }
    }

    pub fn is_held(&self, code: u16) -> bool {
        self.pressed
            .get(code as usize)
            .map(|slot| slot.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Codes of every key currently held, lowest first
    pub fn held(&self) -> Vec<u16> {
        self.pressed
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.load(Ordering::Relaxed))
            .map(|(code, _)| code as u16)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::codes::{KEY_POWER, KEY_VOLUMEDOWN};

    #[test]
    fn tracks_press_and_release() {
        let table = KeyTable::new();
        table.set(KEY_POWER, true);
        table.set(KEY_VOLUMEDOWN, true);
        assert!(table.is_held(KEY_POWER));
        assert_eq!(table.held(), vec![KEY_VOLUMEDOWN, KEY_POWER]);

        table.set(KEY_POWER, false);
        assert!(!table.is_held(KEY_POWER));
    }

    #[test]
    fn codes_past_key_max_are_never_held() {
        let table = KeyTable::new();
        table.set(KEY_MAX + 1, true);
        assert!(!table.is_held(KEY_MAX + 1));
        assert!(table.held().is_empty());
    }
}
