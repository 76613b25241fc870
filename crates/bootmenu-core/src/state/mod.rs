//! Everything the redraw thread paints from, kept behind a single lock

mod bounce;
mod gesture;
mod log;
mod menu;
mod progress;

pub use bounce::BounceAnimation;
pub use gesture::{GesturePhase, GestureState};
pub use log::LogOverlay;
pub use menu::{ItemKind, MenuItem, MenuModel, MenuRequest};
pub use progress::{ProgressKind, ProgressState};

use std::time::Instant;

use tracing::trace;

use crate::config::UiConfig;
use crate::messages::{TouchEvent, TouchResult};

/// Screen rectangle, right and bottom edges exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Default,
    Alt,
}

/// Geometry of the output, measured once when the UI starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub width: i32,
    pub height: i32,
    pub char_width: i32,
    pub char_height: i32,
    /// Width of the progress bar surface, 0 when there is none
    pub progress_bar_width: i32,
}

/// Menu, gesture, animation, progress and log state shared by all UI threads
#[derive(Debug)]
pub struct SharedUiState {
    pub menu: MenuModel,
    pub gesture: GestureState,
    pub bounce: Option<BounceAnimation>,
    pub progress: ProgressState,
    pub log: LogOverlay,
    pub show_text: bool,
    pub background: Option<Background>,
    /// Last touch position, drawn when the debug pointer is enabled
    pub pointer: Option<(i32, i32)>,
    pub screen: ScreenMetrics,
    pub config: UiConfig,
}

impl SharedUiState {
    pub fn new(config: &UiConfig, screen: ScreenMetrics) -> Self {
        let layout = &config.layout;
        let rows = layout.text_rows(screen.height);
        let cols = layout.text_cols(screen.width, screen.char_width);

        Self {
            menu: MenuModel::new(layout.viewport(screen.width, screen.height)),
            gesture: GestureState::new(),
            bounce: None,
            progress: ProgressState::new(
                screen.progress_bar_width,
                config.timing.indeterminate_frames,
            ),
            log: LogOverlay::new(rows, cols),
            show_text: config.display.show_text,
            background: None,
            pointer: None,
            screen,
            config: config.clone(),
        }
    }

    /// Columns available for header and log text
    pub fn text_cols(&self) -> usize {
        self.config
            .layout
            .text_cols(self.screen.width, self.screen.char_width)
    }

    pub fn start_session(&mut self, request: MenuRequest) {
        let cols = self.text_cols();
        self.gesture.reset();
        self.bounce = None;
        self.menu.start_session(request, cols);
    }

    pub fn end_session(&mut self) {
        self.gesture.reset();
        self.bounce = None;
        self.menu.end_session();
    }

    pub fn handle_touch(&mut self, touch: &TouchEvent) -> TouchResult {
        self.pointer = Some((touch.x, touch.y));
        self.gesture.handle(
            touch,
            &mut self.menu,
            &mut self.bounce,
            &self.config.gesture,
        )
    }

    /// Advance the bounce animation. Returns true while one was running.
    pub fn tick_animation(&mut self, now: Instant) -> bool {
        let Some(bounce) = self.bounce else {
            return false;
        };

        let (offset, finished) = bounce.step(self.menu.scroll_offset(), now);
        self.menu.set_scroll_offset(offset);
        if finished {
            trace!(offset, "bounce finished");
            self.bounce = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::TouchPhase;
    use std::time::Duration;

    fn metrics() -> ScreenMetrics {
        ScreenMetrics {
            width: 480,
            height: 854,
            char_width: 10,
            char_height: 18,
            progress_bar_width: 280,
        }
    }

    fn state_with_items(count: usize) -> SharedUiState {
        let mut state = SharedUiState::new(&UiConfig::default(), metrics());
        let items = (0..count)
            .map(|i| MenuItem::new(ItemKind::Small, format!("entry {}", i)))
            .collect();
        state.start_session(MenuRequest::new(items));
        state
    }

    #[test]
    fn rect_edges_are_half_open() {
        let rect = Rect { left: 0, top: 0, right: 10, bottom: 5 };
        assert!(rect.contains(0, 0));
        assert!(rect.contains(9, 4));
        assert!(!rect.contains(10, 4));
        assert!(!rect.contains(9, 5));
        assert_eq!((rect.width(), rect.height()), (10, 5));
    }

    #[test]
    fn new_state_sizes_overlay_from_screen() {
        let state = SharedUiState::new(&UiConfig::default(), metrics());
        assert_eq!(state.log.rows(), 8);
        assert_eq!(state.log.cols(), 48);
        assert_eq!(state.menu.viewport(), Rect { left: 25, top: 130, right: 455, bottom: 834 });
        assert!(state.show_text);
    }

    #[test]
    fn overscroll_bounces_back_to_zero() {
        let mut state = state_with_items(3);
        let t0 = Instant::now();

        let touch = |phase, y, ms| TouchEvent::new(phase, 100, y, t0 + Duration::from_millis(ms));
        state.handle_touch(&touch(TouchPhase::Start, 200, 0));
        state.handle_touch(&touch(TouchPhase::Drag, 240, 50));
        assert_eq!(state.menu.scroll_offset(), 40);

        let release = touch(TouchPhase::Release, 240, 80);
        assert_eq!(state.handle_touch(&release), TouchResult::Empty);
        assert!(state.bounce.is_some());

        assert!(state.tick_animation(release.time + Duration::from_millis(100)));
        assert_eq!(state.menu.scroll_offset(), 20);
        assert!(state.bounce.is_some());

        assert!(state.tick_animation(release.time + Duration::from_millis(200)));
        assert_eq!(state.menu.scroll_offset(), 0);
        assert!(state.bounce.is_none());
        assert!(!state.tick_animation(release.time + Duration::from_millis(300)));
        assert_eq!(state.pointer, Some((100, 240)));
    }

    #[test]
    fn new_touch_cancels_running_bounce() {
        let mut state = state_with_items(3);
        let t0 = Instant::now();
        state.menu.set_scroll_offset(30);
        state.bounce = Some(BounceAnimation::new(30, 0, t0, Duration::from_millis(200)));

        state.handle_touch(&TouchEvent::new(TouchPhase::Start, 100, 300, t0));
        assert!(state.bounce.is_none());
        assert_eq!(state.menu.scroll_offset(), 30);
    }
}
