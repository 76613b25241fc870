use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::error::Result;
use crate::input::{DeviceHooks, KeyTable, SampleSource};
use crate::messages::{KeyMapper, MenuAction, MenuResult, TouchEvent, TouchResult, UiEvent};
use crate::queue::EventQueue;
use crate::render::Canvas;
use crate::services::{spawn_named, InputPump, ProgressTicker, RedrawScheduler, UiRuntime};
use crate::state::{Background, MenuRequest, ProgressKind, ScreenMetrics, SharedUiState};

/// Cloneable handle used by the menu logic to drive the UI
#[derive(Clone)]
pub struct Ui {
    state: Arc<Mutex<SharedUiState>>,
    queue: Arc<EventQueue>,
    keys: Arc<KeyTable>,
}

impl Ui {
    /// Build the shared state without starting any threads
    pub fn new(config: &UiConfig, metrics: ScreenMetrics) -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedUiState::new(config, metrics))),
            queue: Arc::new(EventQueue::new(config.input.queue_capacity)),
            keys: Arc::new(KeyTable::new()),
        }
    }

    /// Start the input, progress and redraw threads
    pub fn spawn(
        config: &UiConfig,
        mut canvas: Box<dyn Canvas>,
        source: Box<dyn SampleSource>,
        hooks: Arc<dyn DeviceHooks>,
    ) -> Result<(Self, UiRuntime)> {
        let metrics = ScreenMetrics::measure(canvas.as_mut());
        let ui = Self::new(config, metrics);
        let running = Arc::new(AtomicBool::new(true));

        let pump = InputPump::new(
            source,
            config.input.trackball_threshold,
            ui.keys.clone(),
            ui.queue.clone(),
            ui.state.clone(),
            hooks,
            running.clone(),
        );
        let ticker = ProgressTicker::new(
            ui.state.clone(),
            running.clone(),
            config.timing.progress_fps,
        );
        let redraw = RedrawScheduler::new(
            ui.state.clone(),
            canvas,
            running.clone(),
            config.timing.redraw_fps,
            config.display.clock_format.clone(),
        );

        let handles = spawn_named("redraw", move || redraw.run()).and_then(|redraw| {
            let progress = spawn_named("progress", move || ticker.run())?;
            spawn_named("input", move || pump.run())?;
            Ok((redraw, progress))
        });

        match handles {
            Ok((redraw, progress)) => {
                info!(
                    width = metrics.width,
                    height = metrics.height,
                    "UI runtime started"
                );
                Ok((ui, UiRuntime::new(running, redraw, progress)))
            }
            Err(e) => {
                running.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    pub fn start_session(&self, request: MenuRequest) {
        let count = request.items.len();
        self.state.lock().start_session(request);
        info!(items = count, "menu session started");
    }

    pub fn end_session(&self) {
        self.state.lock().end_session();
        info!("menu session ended");
    }

    /// Select an item, wrapping out-of-range indices. `None` without a session.
    pub fn set_selection(&self, index: isize) -> Option<usize> {
        self.state.lock().menu.select(index)
    }

    pub fn move_selection(&self, delta: isize) -> Option<usize> {
        self.state.lock().menu.move_by(delta)
    }

    pub fn selection(&self) -> Option<usize> {
        self.state.lock().menu.selected()
    }

    pub fn is_session_active(&self) -> bool {
        self.state.lock().menu.is_active()
    }

    pub fn handle_touch(&self, touch: &TouchEvent) -> TouchResult {
        self.state.lock().handle_touch(touch)
    }

    pub fn set_progress(&self, kind: ProgressKind, fraction: f32, scope_seconds: u64) -> bool {
        self.state
            .lock()
            .progress
            .set(kind, fraction, scope_seconds, Instant::now())
    }

    pub fn show_progress(&self, portion: f32, seconds: u64) {
        self.state
            .lock()
            .progress
            .show_scope(portion, seconds, Instant::now());
    }

    pub fn set_progress_fraction(&self, fraction: f32) -> bool {
        self.state.lock().progress.set_fraction(fraction)
    }

    pub fn show_indeterminate_progress(&self) {
        self.state.lock().progress.show_indeterminate();
    }

    pub fn reset_progress(&self) {
        self.state.lock().progress.reset();
    }

    /// Block until the input thread delivers an event
    pub fn wait_next_event(&self) -> UiEvent {
        self.queue.pop()
    }

    pub fn is_key_held(&self, code: u16) -> bool {
        self.keys.is_held(code)
    }

    pub fn clear_events(&self) {
        self.queue.clear();
    }

    /// Append text to the on-screen log
    pub fn print(&self, text: &str) {
        info!(target: "bootmenu_core::log", "{}", text.trim_end());
        self.state.lock().log.print(text);
    }

    pub fn show_text(&self, visible: bool) {
        self.state.lock().show_text = visible;
    }

    pub fn text_visible(&self) -> bool {
        self.state.lock().show_text
    }

    pub fn set_background(&self, background: Option<Background>) {
        self.state.lock().background = background;
    }

    pub fn set_active_tab(&self, tab: usize) {
        self.state.lock().menu.set_active_tab(tab);
    }

    pub fn next_tab(&self) -> usize {
        self.state.lock().menu.next_tab()
    }

    /// Present a menu and block until the user picks an item, goes back or
    /// switches tabs.
    pub fn menu_selection(&self, request: MenuRequest, mapper: &dyn KeyMapper) -> MenuResult {
        self.clear_events();
        self.start_session(request);
        if !self.is_session_active() {
            return MenuResult::GoBack;
        }

        let result = loop {
            let step = match self.wait_next_event() {
                UiEvent::Key { code, pressed: true } => {
                    let action = mapper.handle_key(code, self.text_visible());
                    debug!(code, ?action, "menu key");
                    self.apply_action(action)
                }
                UiEvent::Key { .. } => None,
                UiEvent::Touch(touch) => match self.handle_touch(&touch) {
                    TouchResult::ItemActivated(index) => {
                        self.set_selection(index as isize).map(MenuResult::Selected)
                    }
                    TouchResult::Empty => None,
                },
            };
            if let Some(result) = step {
                break result;
            }
        };

        self.end_session();
        result
    }

    fn apply_action(&self, action: MenuAction) -> Option<MenuResult> {
        match action {
            MenuAction::NoAction => None,
            MenuAction::HighlightUp => {
                self.move_selection(-1);
                None
            }
            MenuAction::HighlightDown => {
                self.move_selection(1);
                None
            }
            MenuAction::SelectItem => self.selection().map(MenuResult::Selected),
            MenuAction::Cancel => Some(MenuResult::GoBack),
            MenuAction::NextTab => Some(MenuResult::NextTab(self.next_tab())),
            MenuAction::Invoke(index) => {
                self.set_selection(index as isize).map(MenuResult::Selected)
            }
        }
    }
}
