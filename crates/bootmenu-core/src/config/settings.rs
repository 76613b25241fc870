use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::state::Rect;

/// Boot menu UI settings - every field falls back to the stock layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub layout: LayoutConfig,
    pub gesture: GestureConfig,
    pub input: InputConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
}

/// Screen chrome geometry in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub status_bar_height: i32,
    pub tab_bar_height: i32,
    pub margin_left: i32,
    pub margin_right: i32,
    pub margin_bottom: i32,
    pub frame_width: i32,
    /// Height of one log row, used to size the log overlay
    pub row_height: i32,
    pub max_rows: usize,
    pub max_cols: usize,
}

/// Tap / scroll disambiguation thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub scroll_threshold_px: i32,
    pub scroll_window_ms: u64,
    pub bounce_duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub queue_capacity: usize,
    /// Accumulated trackball motion needed to emit one Up/Down press
    pub trackball_threshold: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub redraw_fps: u32,
    pub progress_fps: u32,
    pub indeterminate_frames: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_percent: bool,
    pub debug_pointer: bool,
    pub clock_format: String,
    /// Whether the menu and log are visible before any toggle key is pressed
    pub show_text: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            status_bar_height: 40,
            tab_bar_height: 90,
            margin_left: 20,
            margin_right: 20,
            margin_bottom: 20,
            frame_width: 5,
            row_height: 100,
            max_rows: 40,
            max_cols: 96,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 10,
            scroll_window_ms: 300,
            bounce_duration_ms: 200,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            trackball_threshold: 3,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            redraw_fps: 60,
            progress_fps: 15,
            indeterminate_frames: 1,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_percent: true,
            debug_pointer: false,
            clock_format: "%I:%M".to_string(),
            show_text: true,
        }
    }
}

impl UiConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }
}

impl LayoutConfig {
    /// Scrollable menu area for a screen of the given size
    pub fn viewport(&self, width: i32, height: i32) -> Rect {
        let top = self.status_bar_height + self.tab_bar_height;
        Rect {
            left: self.margin_left + self.frame_width,
            top,
            right: width - self.margin_right - self.frame_width,
            bottom: (height - self.margin_bottom).max(top),
        }
    }

    pub fn text_rows(&self, height: i32) -> usize {
        if self.row_height <= 0 {
            return 0;
        }
        ((height / self.row_height).max(0) as usize).min(self.max_rows)
    }

    pub fn text_cols(&self, width: i32, char_width: i32) -> usize {
        if char_width <= 0 {
            return 0;
        }
        ((width / char_width).max(0) as usize).min(self.max_cols.saturating_sub(1))
    }
}

impl GestureConfig {
    pub fn scroll_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.scroll_window_ms)
    }

    pub fn bounce_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.bounce_duration_ms)
    }
}
