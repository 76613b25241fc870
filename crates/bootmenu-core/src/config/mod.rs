mod settings;

pub use settings::{
    DisplayConfig, GestureConfig, InputConfig, LayoutConfig, TimingConfig, UiConfig,
};
