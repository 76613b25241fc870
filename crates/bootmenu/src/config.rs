//! Configuration for the bootmenu binary

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bootmenu_core::codes::{
    KEY_BACK, KEY_CAMERA, KEY_DOWN, KEY_ENTER, KEY_L, KEY_LEFTALT, KEY_MENU, KEY_POWER, KEY_R,
    KEY_UP, KEY_VOLUMEDOWN, KEY_VOLUMEUP,
};
use bootmenu_core::{ItemKind, MenuItem, MenuRequest, UiConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_CONFIG: &str = "/etc/bootmenu/bootmenu.toml";

/// Main bootmenu configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootmenuConfig {
    /// Layout, gesture and timing settings for the UI core
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub screen: ScreenConfig,

    #[serde(default)]
    pub input: DeviceConfig,

    #[serde(default)]
    pub keys: KeyConfig,

    #[serde(default)]
    pub menu: MenuConfig,
}

/// Output size used by the headless canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default = "default_width")]
    pub width: i32,

    #[serde(default = "default_height")]
    pub height: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> i32 {
    480
}

fn default_height() -> i32 {
    854
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Event devices to read. Empty means every /dev/input/event* node.
    #[serde(default)]
    pub devices: Vec<PathBuf>,
}

/// A key, optionally held together with a modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCombo {
    #[serde(default)]
    pub modifier: Option<u16>,
    pub key: u16,
}

/// Key codes for navigation and device actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    #[serde(default = "default_up")]
    pub up: Vec<u16>,

    #[serde(default = "default_down")]
    pub down: Vec<u16>,

    #[serde(default = "default_select")]
    pub select: Vec<u16>,

    #[serde(default = "default_back")]
    pub back: Vec<u16>,

    #[serde(default = "default_next_tab")]
    pub next_tab: Vec<u16>,

    #[serde(default = "default_toggle_display")]
    pub toggle_display: KeyCombo,

    #[serde(default = "default_reboot")]
    pub reboot: KeyCombo,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            up: default_up(),
            down: default_down(),
            select: default_select(),
            back: default_back(),
            next_tab: default_next_tab(),
            toggle_display: default_toggle_display(),
            reboot: default_reboot(),
        }
    }
}

fn default_up() -> Vec<u16> {
    vec![KEY_UP, KEY_VOLUMEUP]
}

fn default_down() -> Vec<u16> {
    vec![KEY_DOWN, KEY_VOLUMEDOWN]
}

fn default_select() -> Vec<u16> {
    vec![KEY_ENTER, KEY_CAMERA, KEY_POWER]
}

fn default_back() -> Vec<u16> {
    vec![KEY_BACK]
}

fn default_next_tab() -> Vec<u16> {
    vec![KEY_MENU]
}

fn default_toggle_display() -> KeyCombo {
    KeyCombo {
        modifier: Some(KEY_LEFTALT),
        key: KEY_L,
    }
}

fn default_reboot() -> KeyCombo {
    KeyCombo {
        modifier: Some(KEY_LEFTALT),
        key: KEY_R,
    }
}

/// Menu contents, grouped by tab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub headers: Vec<String>,

    #[serde(default)]
    pub tabs: Vec<String>,

    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        let entry = |id: &str, title: &str, tab| EntryConfig {
            id: id.to_string(),
            tab,
            kind: ItemKind::Small,
            title: title.to_string(),
            description: None,
        };

        Self {
            headers: vec!["Boot menu".to_string()],
            tabs: vec!["Boot".to_string(), "Tools".to_string()],
            entries: vec![
                entry("normal", "Normal boot", 0),
                entry("recovery", "Recovery", 0),
                entry("shell", "Shell", 1),
                entry("reboot", "Reboot", 1),
            ],
        }
    }
}

/// One selectable entry. `id` is printed when it is chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryConfig {
    pub id: String,

    /// Index of the tab the entry belongs to
    #[serde(default)]
    pub tab: usize,

    #[serde(default)]
    pub kind: ItemKind,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl MenuConfig {
    /// Build the request for `tab` together with the ids of its items
    pub fn request(&self, tab: usize) -> (MenuRequest, Vec<&str>) {
        let entries: Vec<&EntryConfig> = self.entries.iter().filter(|e| e.tab == tab).collect();
        let items = entries
            .iter()
            .map(|entry| {
                let item = MenuItem::new(entry.kind, entry.title.as_str());
                match &entry.description {
                    Some(description) => item.with_description(description.as_str()),
                    None => item,
                }
            })
            .collect();

        let request = MenuRequest {
            headers: self.headers.clone(),
            tabs: self.tabs.clone(),
            items,
            initial_selection: 0,
        };
        (request, entries.iter().map(|e| e.id.as_str()).collect())
    }

    /// First tab at or after `tab` that has entries, wrapping past the last
    pub fn populated_tab(&self, tab: usize) -> usize {
        let count = self.tabs.len().max(1);
        (0..count)
            .map(|step| (tab + step) % count)
            .find(|candidate| self.entries.iter().any(|e| e.tab == *candidate))
            .unwrap_or(tab)
    }

    /// Tabs that have no entries
    pub fn empty_tabs(&self) -> Vec<&str> {
        self.tabs
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.entries.iter().any(|e| e.tab == *index))
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

impl BootmenuConfig {
    /// Load from `path`, using defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_default_menu() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = BootmenuConfig::load(&dir.path().join("bootmenu.toml"))?;
        assert_eq!(config.screen.width, 480);
        assert_eq!(config.menu.tabs.len(), 2);
        assert_eq!(config.keys.reboot, KeyCombo { modifier: Some(KEY_LEFTALT), key: KEY_R });
        Ok(())
    }

    #[test]
    fn entries_are_grouped_by_tab() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bootmenu.toml");
        fs::write(
            &path,
            r#"
[ui.gesture]
scroll_threshold_px = 16

[keys]
select = [28]

[menu]
tabs = ["Boot", "Tools", "Empty"]

[[menu.entries]]
id = "normal"
title = "Normal boot"

[[menu.entries]]
id = "adb"
tab = 1
kind = "full"
title = "ADB"
description = "usb debugging"
"#,
        )?;

        let config = BootmenuConfig::load(&path)?;
        assert_eq!(config.ui.gesture.scroll_threshold_px, 16);
        assert_eq!(config.ui.gesture.scroll_window_ms, 300);
        assert_eq!(config.keys.select, vec![KEY_ENTER]);
        assert_eq!(config.keys.up, default_up());

        let (request, ids) = config.menu.request(1);
        assert_eq!(ids, vec!["adb"]);
        assert_eq!(request.items[0].kind, ItemKind::Full);
        assert_eq!(request.items[0].description.as_deref(), Some("usb debugging"));
        assert_eq!(config.menu.empty_tabs(), vec!["Empty"]);
        Ok(())
    }

    #[test]
    fn tab_switching_skips_empty_tabs() {
        let mut menu = MenuConfig::default();
        menu.tabs.push("Empty".to_string());
        menu.tabs.push("Extra".to_string());
        menu.entries.push(EntryConfig {
            id: "extra".to_string(),
            tab: 3,
            kind: ItemKind::Small,
            title: "Extra".to_string(),
            description: None,
        });

        assert_eq!(menu.populated_tab(1), 1);
        assert_eq!(menu.populated_tab(2), 3);
        assert_eq!(menu.populated_tab(4), 0);

        menu.entries.clear();
        assert_eq!(menu.populated_tab(2), 2);
    }

    #[test]
    fn parse_errors_name_the_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[menu\n")?;

        let err = BootmenuConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));
        Ok(())
    }
}
