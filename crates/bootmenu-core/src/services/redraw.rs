use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use parking_lot::Mutex;
use tracing::trace;

use crate::render::{draw_screen, Canvas};
use crate::state::SharedUiState;

/// Repaints the whole screen at a fixed rate
pub struct RedrawScheduler {
    state: Arc<Mutex<SharedUiState>>,
    canvas: Box<dyn Canvas>,
    running: Arc<AtomicBool>,
    interval: Duration,
    clock_format: String,
}

impl RedrawScheduler {
    pub fn new(
        state: Arc<Mutex<SharedUiState>>,
        canvas: Box<dyn Canvas>,
        running: Arc<AtomicBool>,
        fps: u32,
        clock_format: String,
    ) -> Self {
        Self {
            state,
            canvas,
            running,
            interval: Duration::from_secs(1) / fps.max(1),
            clock_format,
        }
    }

    /// Advance animations and paint one frame. Returns true while a bounce is running.
    pub fn render_frame(&mut self, now: Instant) -> bool {
        let clock = format_clock(&self.clock_format);

        let mut state = self.state.lock();
        let animating = state.tick_animation(now);
        draw_screen(&state, self.canvas.as_mut(), &clock);
        self.canvas.flip();
        animating
    }

    pub fn run(mut self) {
        while self.running.load(Ordering::Acquire) {
            let started = Instant::now();
            if self.render_frame(started) {
                trace!("bounce frame");
            }
            thread::sleep(self.interval.saturating_sub(started.elapsed()));
        }
    }
}

/// Local time in `format`, empty if the format string is invalid
fn format_clock(format: &str) -> String {
    let mut clock = String::new();
    if write!(clock, "{}", Local::now().format(format)).is_err() {
        clock.clear();
    }
    clock
}
