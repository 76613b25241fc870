//! Linux evdev sample source

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use bootmenu_core::codes::BTN_TOUCH;
use bootmenu_core::{RawSample, SampleKind, SampleSource};
use evdev::{Device, EventType};
use tracing::{debug, info, warn};

const ABS_X: u16 = 0x00;
const ABS_Y: u16 = 0x01;
const ABS_MT_POSITION_X: u16 = 0x35;
const ABS_MT_POSITION_Y: u16 = 0x36;
const ABS_MT_TRACKING_ID: u16 = 0x39;

/// Merges every opened device into one blocking stream of samples.
///
/// Each device gets its own reader thread. The stream ends once all of them
/// have stopped.
pub struct EvdevSource {
    samples: Receiver<RawSample>,
}

impl EvdevSource {
    pub fn open(paths: &[PathBuf]) -> Result<Self> {
        let paths = if paths.is_empty() {
            discover(Path::new("/dev/input"))?
        } else {
            paths.to_vec()
        };

        let (tx, rx) = mpsc::channel();
        let mut opened = 0;
        for path in paths {
            let device = match Device::open(&path) {
                Ok(device) => device,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            info!(
                "Reading {} ({})",
                path.display(),
                device.name().unwrap_or("unnamed device")
            );

            let tx = tx.clone();
            let name = format!("evdev-{}", opened);
            thread::Builder::new()
                .name(name)
                .spawn(move || read_device(device, path, tx))
                .context("Failed to spawn evdev reader")?;
            opened += 1;
        }

        if opened == 0 {
            bail!("No readable input devices");
        }
        Ok(Self { samples: rx })
    }
}

impl SampleSource for EvdevSource {
    fn next_sample(&mut self) -> io::Result<Option<RawSample>> {
        Ok(self.samples.recv().ok())
    }
}

/// Event nodes under `dir`, sorted by name
fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().starts_with("event"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn read_device(mut device: Device, path: PathBuf, tx: Sender<RawSample>) {
    let mut contact = ContactTracker::default();
    loop {
        let events = match device.fetch_events() {
            Ok(events) => events,
            Err(e) => {
                warn!("{} stopped: {}", path.display(), e);
                return;
            }
        };

        for ev in events {
            let sample = contact.translate(ev.event_type(), ev.code(), ev.value(), Instant::now());
            if let Some(sample) = sample {
                if tx.send(sample).is_err() {
                    debug!("{} reader exiting, UI gone", path.display());
                    return;
                }
            }
        }
    }
}

/// Collects absolute axis updates and reports one contact sample per frame
#[derive(Debug, Default)]
struct ContactTracker {
    x: i32,
    y: i32,
    touching: bool,
    dirty: bool,
}

impl ContactTracker {
    fn translate(
        &mut self,
        event_type: EventType,
        code: u16,
        value: i32,
        time: Instant,
    ) -> Option<RawSample> {
        match event_type {
            EventType::SYNCHRONIZATION => {
                if std::mem::take(&mut self.dirty) {
                    Some(RawSample::contact(self.x, self.y, self.touching, time))
                } else {
                    Some(RawSample::sync(time))
                }
            }
            EventType::KEY if code == BTN_TOUCH => {
                self.touching = value > 0;
                self.dirty = true;
                None
            }
            EventType::KEY => Some(RawSample {
                time,
                kind: SampleKind::Key,
                code,
                value,
            }),
            EventType::RELATIVE => Some(RawSample::relative(code, value, time)),
            EventType::ABSOLUTE => {
                match code {
                    ABS_X | ABS_MT_POSITION_X => self.x = value,
                    ABS_Y | ABS_MT_POSITION_Y => self.y = value,
                    ABS_MT_TRACKING_ID => self.touching = value >= 0,
                    _ => return None,
                }
                self.dirty = true;
                None
            }
            other => Some(RawSample {
                time,
                kind: SampleKind::Other(other.0),
                code,
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_frame_becomes_one_contact_sample() {
        let now = Instant::now();
        let mut tracker = ContactTracker::default();

        assert_eq!(tracker.translate(EventType::ABSOLUTE, ABS_MT_POSITION_X, 120, now), None);
        assert_eq!(tracker.translate(EventType::ABSOLUTE, ABS_MT_POSITION_Y, 300, now), None);
        assert_eq!(tracker.translate(EventType::KEY, BTN_TOUCH, 1, now), None);
        assert_eq!(
            tracker.translate(EventType::SYNCHRONIZATION, 0, 0, now),
            Some(RawSample::contact(120, 300, true, now))
        );

        // nothing changed since the last frame
        assert_eq!(
            tracker.translate(EventType::SYNCHRONIZATION, 0, 0, now),
            Some(RawSample::sync(now))
        );

        tracker.translate(EventType::KEY, BTN_TOUCH, 0, now);
        assert_eq!(
            tracker.translate(EventType::SYNCHRONIZATION, 0, 0, now),
            Some(RawSample::contact(120, 300, false, now))
        );
    }

    #[test]
    fn tracking_id_reports_lift_off() {
        let now = Instant::now();
        let mut tracker = ContactTracker::default();
        tracker.translate(EventType::ABSOLUTE, ABS_MT_TRACKING_ID, 4, now);
        tracker.translate(EventType::ABSOLUTE, ABS_X, 10, now);
        assert_eq!(
            tracker.translate(EventType::SYNCHRONIZATION, 0, 0, now),
            Some(RawSample::contact(10, 0, true, now))
        );

        tracker.translate(EventType::ABSOLUTE, ABS_MT_TRACKING_ID, -1, now);
        assert_eq!(
            tracker.translate(EventType::SYNCHRONIZATION, 0, 0, now),
            Some(RawSample::contact(10, 0, false, now))
        );
    }

    #[test]
    fn keys_and_motion_pass_through() {
        let now = Instant::now();
        let mut tracker = ContactTracker::default();
        let key = tracker.translate(EventType::KEY, 108, 2, now);
        assert_eq!(key.map(|s| (s.kind, s.code, s.value)), Some((SampleKind::Key, 108, 2)));

        let rel = tracker.translate(EventType::RELATIVE, 1, -4, now);
        assert_eq!(rel, Some(RawSample::relative(1, -4, now)));

        let misc = tracker.translate(EventType::MISC, 4, 7, now);
        assert_eq!(misc.map(|s| s.kind), Some(SampleKind::Other(EventType::MISC.0)));
    }

    #[test]
    fn discover_lists_event_nodes_only() -> Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["event3", "event0", "mouse0", "js0"] {
            fs::write(dir.path().join(name), "")?;
        }
        let found = discover(dir.path())?;
        assert_eq!(found, vec![dir.path().join("event0"), dir.path().join("event3")]);
        Ok(())
    }
}
