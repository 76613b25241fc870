//! Long-lived UI threads

mod input;
mod progress;
mod redraw;

pub use input::InputPump;
pub use progress::ProgressTicker;
pub use redraw::RedrawScheduler;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::error::{Error, Result};

pub(crate) fn spawn_named<F>(name: &'static str, f: F) -> Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name(format!("bootmenu-{}", name))
        .spawn(f)
        .map_err(|source| Error::Spawn { name, source })
}

/// Handle to the running UI threads. Dropping it stops redraw and progress.
///
/// The input thread may be blocked inside its sample source, so it is left
/// detached and exits after its next sample.
pub struct UiRuntime {
    running: Arc<AtomicBool>,
    redraw: Option<JoinHandle<()>>,
    progress: Option<JoinHandle<()>>,
}

impl UiRuntime {
    pub(crate) fn new(
        running: Arc<AtomicBool>,
        redraw: JoinHandle<()>,
        progress: JoinHandle<()>,
    ) -> Self {
        Self {
            running,
            redraw: Some(redraw),
            progress: Some(progress),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn shutdown(&mut self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }

        for (name, handle) in [("redraw", self.redraw.take()), ("progress", self.progress.take())] {
            if let Some(handle) = handle {
                if handle.join().is_err() {
                    warn!("{} thread panicked", name);
                }
            }
        }
        info!("UI runtime stopped");
    }
}

impl Drop for UiRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
