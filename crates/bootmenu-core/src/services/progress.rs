use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::trace;

use crate::state::SharedUiState;

/// Advances indeterminate animation frames and timed progress scopes
pub struct ProgressTicker {
    state: Arc<Mutex<SharedUiState>>,
    running: Arc<AtomicBool>,
    interval: Duration,
}

impl ProgressTicker {
    pub fn new(state: Arc<Mutex<SharedUiState>>, running: Arc<AtomicBool>, fps: u32) -> Self {
        Self {
            state,
            running,
            interval: Duration::from_secs(1) / fps.max(1),
        }
    }

    pub fn tick(&self, now: Instant) -> bool {
        let mut state = self.state.lock();
        let show_text = state.show_text;
        state.progress.tick(now, show_text)
    }

    pub fn run(self) {
        while self.running.load(Ordering::Acquire) {
            let started = Instant::now();
            if self.tick(started) {
                trace!("progress bar changed");
            }
            thread::sleep(self.interval.saturating_sub(started.elapsed()));
        }
    }
}
