pub mod config;
pub mod error;
pub mod input;
pub mod messages;
pub mod queue;
pub mod render;
pub mod services;
pub mod state;
pub mod ui;

pub use config::{DisplayConfig, GestureConfig, InputConfig, LayoutConfig, TimingConfig, UiConfig};
pub use error::{Error, Result};
pub use input::{codes, DeviceHooks, KeyTable, RawSample, SampleKind, SampleSource};
pub use messages::{KeyMapper, MenuAction, MenuResult, TouchEvent, TouchPhase, TouchResult, UiEvent};
pub use queue::EventQueue;
pub use render::{Canvas, Font, Surface};
pub use services::UiRuntime;
pub use state::{Background, ItemKind, MenuItem, MenuRequest, ProgressKind, Rect, ScreenMetrics};
pub use ui::Ui;
