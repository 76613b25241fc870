use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::input::{DeviceHooks, EventClassifier, KeyTable, RawSample, SampleSource};
use crate::messages::UiEvent;
use crate::queue::EventQueue;
use crate::state::SharedUiState;

/// Reads the sample source, classifies samples and feeds the event queue
pub struct InputPump {
    source: Box<dyn SampleSource>,
    classifier: EventClassifier,
    keys: Arc<KeyTable>,
    queue: Arc<EventQueue>,
    state: Arc<Mutex<SharedUiState>>,
    hooks: Arc<dyn DeviceHooks>,
    running: Arc<AtomicBool>,
}

impl InputPump {
    pub fn new(
        source: Box<dyn SampleSource>,
        trackball_threshold: i32,
        keys: Arc<KeyTable>,
        queue: Arc<EventQueue>,
        state: Arc<Mutex<SharedUiState>>,
        hooks: Arc<dyn DeviceHooks>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            source,
            classifier: EventClassifier::new(trackball_threshold),
            keys,
            queue,
            state,
            hooks,
            running,
        }
    }

    pub fn handle_sample(&mut self, sample: &RawSample) {
        let Some(classified) = self.classifier.classify(sample, &self.keys) else {
            return;
        };

        match classified.event {
            UiEvent::Key { code, pressed: true } => {
                // device policy runs without holding the UI lock
                if self.hooks.toggle_display(&self.keys, code) {
                    let mut state = self.state.lock();
                    state.show_text = !state.show_text;
                    debug!(show_text = state.show_text, "display toggled");
                }
                if self.hooks.reboot_now(&self.keys, code) {
                    info!(code, "reboot key combination pressed");
                    self.hooks.reboot();
                }
                self.queue.push(classified.event);
            }
            UiEvent::Key { pressed: false, .. } => {}
            UiEvent::Touch(_) => {
                self.queue.push(classified.event);
            }
        }
    }

    /// Pump until the source ends, fails, or the runtime stops
    pub fn run(mut self) {
        while self.running.load(Ordering::Acquire) {
            match self.source.next_sample() {
                Ok(Some(sample)) => self.handle_sample(&sample),
                Ok(None) => {
                    info!("input source closed");
                    break;
                }
                Err(e) => {
                    error!("input source failed: {}", e);
                    break;
                }
            }
        }
    }
}
