//! Key policy and reboot handling for the target device

use bootmenu_core::{DeviceHooks, KeyMapper, KeyTable, MenuAction};
use nix::sys::reboot::{reboot, RebootMode};
use tracing::{error, warn};

use crate::config::{KeyCombo, KeyConfig};

pub struct KeyPolicy {
    keys: KeyConfig,
}

impl KeyPolicy {
    pub fn new(keys: KeyConfig) -> Self {
        Self { keys }
    }

    fn matches(combo: &KeyCombo, held: &KeyTable, code: u16) -> bool {
        code == combo.key && combo.modifier.map_or(true, |m| held.is_held(m))
    }
}

impl DeviceHooks for KeyPolicy {
    fn toggle_display(&self, held: &KeyTable, code: u16) -> bool {
        Self::matches(&self.keys.toggle_display, held, code)
    }

    fn reboot_now(&self, held: &KeyTable, code: u16) -> bool {
        Self::matches(&self.keys.reboot, held, code)
    }

    fn reboot(&self) {
        warn!("Rebooting on user request");
        nix::unistd::sync();
        if let Err(e) = reboot(RebootMode::RB_AUTOBOOT) {
            error!("reboot failed: {}", e);
        }
    }
}

impl KeyMapper for KeyPolicy {
    fn handle_key(&self, code: u16, visible: bool) -> MenuAction {
        if !visible {
            return MenuAction::NoAction;
        }

        let keys = &self.keys;
        if keys.up.contains(&code) {
            MenuAction::HighlightUp
        } else if keys.down.contains(&code) {
            MenuAction::HighlightDown
        } else if keys.select.contains(&code) {
            MenuAction::SelectItem
        } else if keys.back.contains(&code) {
            MenuAction::Cancel
        } else if keys.next_tab.contains(&code) {
            MenuAction::NextTab
        } else {
            MenuAction::NoAction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootmenu_core::codes::{KEY_BACK, KEY_DOWN, KEY_L, KEY_LEFTALT, KEY_MENU, KEY_POWER, KEY_R};

    #[test]
    fn navigation_only_while_visible() {
        let policy = KeyPolicy::new(KeyConfig::default());
        assert_eq!(policy.handle_key(KEY_DOWN, true), MenuAction::HighlightDown);
        assert_eq!(policy.handle_key(KEY_POWER, true), MenuAction::SelectItem);
        assert_eq!(policy.handle_key(KEY_BACK, true), MenuAction::Cancel);
        assert_eq!(policy.handle_key(KEY_MENU, true), MenuAction::NextTab);
        assert_eq!(policy.handle_key(KEY_L, true), MenuAction::NoAction);
        assert_eq!(policy.handle_key(KEY_DOWN, false), MenuAction::NoAction);
    }

    #[test]
    fn combos_need_their_modifier() {
        let policy = KeyPolicy::new(KeyConfig::default());
        let held = KeyTable::new();
        assert!(!policy.toggle_display(&held, KEY_L));

        held.set(KEY_LEFTALT, true);
        assert!(policy.toggle_display(&held, KEY_L));
        assert!(policy.reboot_now(&held, KEY_R));
        assert!(!policy.reboot_now(&held, KEY_L));
    }

    #[test]
    fn combo_without_modifier_matches_key_alone() {
        let mut keys = KeyConfig::default();
        keys.toggle_display = KeyCombo { modifier: None, key: KEY_MENU };
        let policy = KeyPolicy::new(keys);
        assert!(policy.toggle_display(&KeyTable::new(), KEY_MENU));
    }
}
