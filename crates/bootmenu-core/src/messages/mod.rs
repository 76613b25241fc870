mod actions;
mod events;

pub use actions::{KeyMapper, MenuAction, MenuResult, TouchResult};
pub use events::{TouchEvent, TouchPhase, UiEvent};
