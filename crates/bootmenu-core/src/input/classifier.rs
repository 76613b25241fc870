use tracing::trace;

use super::codes::{KEY_DOWN, KEY_MAX, KEY_UP, REL_Y};
use super::{KeyTable, RawSample, SampleKind};
use crate::messages::{TouchEvent, TouchPhase, UiEvent};

/// A classified event plus whether it was synthesized from trackball motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub event: UiEvent,
    pub synthetic: bool,
}

/// Turns raw samples into UI events.
///
/// Keeps the trackball accumulator and the touch contact state between samples.
#[derive(Debug)]
pub struct EventClassifier {
    trackball_threshold: i32,
    rel_sum: i32,
    touching: bool,
}

impl EventClassifier {
    pub fn new(trackball_threshold: i32) -> Self {
        Self {
            trackball_threshold,
            rel_sum: 0,
            touching: false,
        }
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Classify one sample, updating `held` for real key events.
    ///
    /// Returns `None` for samples that produce no event.
    pub fn classify(&mut self, sample: &RawSample, held: &KeyTable) -> Option<Classified> {
        match sample.kind {
            SampleKind::Sync => None,
            SampleKind::Relative => self.accumulate(sample),
            SampleKind::Key => {
                self.rel_sum = 0;
                if sample.code > KEY_MAX {
                    return None;
                }
                let pressed = sample.value > 0;
                held.set(sample.code, pressed);
                Some(Classified {
                    event: UiEvent::Key {
                        code: sample.code,
                        pressed,
                    },
                    synthetic: false,
                })
            }
            SampleKind::Absolute { x, y } => {
                self.rel_sum = 0;
                let phase = if sample.code == 0 {
                    if !self.touching {
                        return None;
                    }
                    self.touching = false;
                    TouchPhase::Release
                } else if self.touching {
                    TouchPhase::Drag
                } else {
                    self.touching = true;
                    TouchPhase::Start
                };
                Some(Classified {
                    event: UiEvent::Touch(TouchEvent::new(phase, x, y, sample.time)),
                    synthetic: false,
                })
            }
            SampleKind::Other(_) => {
                self.rel_sum = 0;
                None
            }
        }
    }

    fn accumulate(&mut self, sample: &RawSample) -> Option<Classified> {
        if sample.code != REL_Y {
            return None;
        }

        self.rel_sum += sample.value;
        let code = if self.rel_sum > self.trackball_threshold {
            KEY_DOWN
        } else if self.rel_sum < -self.trackball_threshold {
            KEY_UP
        } else {
            return None;
        };

        trace!(code, rel_sum = self.rel_sum, "trackball motion emitted key");
        self.rel_sum = 0;
        Some(Classified {
            event: UiEvent::key_down(code),
            synthetic: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::codes::{KEY_POWER, REL_Y};
    use std::time::Instant;

    fn classify_all(
        classifier: &mut EventClassifier,
        held: &KeyTable,
        samples: &[RawSample],
    ) -> Vec<Classified> {
        samples
            .iter()
            .filter_map(|s| classifier.classify(s, held))
            .collect()
    }

    #[test]
    fn trackball_motion_becomes_synthetic_arrow_keys() {
        let now = Instant::now();
        let held = KeyTable::new();
        let mut classifier = EventClassifier::new(3);

        let out = classify_all(
            &mut classifier,
            &held,
            &[
                RawSample::relative(REL_Y, 2, now),
                RawSample::relative(REL_Y, 2, now),
                RawSample::relative(REL_Y, -3, now),
                RawSample::relative(REL_Y, -2, now),
            ],
        );

        assert_eq!(
            out,
            vec![
                Classified { event: UiEvent::key_down(KEY_DOWN), synthetic: true },
                Classified { event: UiEvent::key_down(KEY_UP), synthetic: true },
            ]
        );
        // synthetic keys only report a press, never a release
        assert!(!held.is_held(KEY_DOWN));
        assert!(!held.is_held(KEY_UP));
    }

    #[test]
    fn sync_keeps_accumulator_but_other_samples_reset_it() {
        let now = Instant::now();
        let held = KeyTable::new();
        let mut classifier = EventClassifier::new(3);

        assert!(classifier.classify(&RawSample::relative(REL_Y, 3, now), &held).is_none());
        assert!(classifier.classify(&RawSample::sync(now), &held).is_none());
        assert!(classifier.classify(&RawSample::relative(REL_Y, 1, now), &held).is_some());

        assert!(classifier.classify(&RawSample::relative(REL_Y, 3, now), &held).is_none());
        classifier.classify(&RawSample::key(KEY_POWER, false, now), &held);
        assert!(classifier.classify(&RawSample::relative(REL_Y, 1, now), &held).is_none());
    }

    #[test]
    fn real_keys_update_held_table() {
        let now = Instant::now();
        let held = KeyTable::new();
        let mut classifier = EventClassifier::new(3);

        let down = classifier.classify(&RawSample::key(KEY_POWER, true, now), &held);
        assert_eq!(
            down,
            Some(Classified { event: UiEvent::key_down(KEY_POWER), synthetic: false })
        );
        assert!(held.is_held(KEY_POWER));

        let up = classifier.classify(&RawSample::key(KEY_POWER, false, now), &held);
        assert_eq!(
            up.map(|c| c.event),
            Some(UiEvent::Key { code: KEY_POWER, pressed: false })
        );
        assert!(!held.is_held(KEY_POWER));
    }

    #[test]
    fn out_of_range_and_unknown_samples_are_dropped() {
        let now = Instant::now();
        let held = KeyTable::new();
        let mut classifier = EventClassifier::new(3);

        assert!(classifier.classify(&RawSample::key(KEY_MAX + 1, true, now), &held).is_none());
        let other = RawSample { time: now, kind: SampleKind::Other(0x04), code: 0, value: 7 };
        assert!(classifier.classify(&other, &held).is_none());
    }

    #[test]
    fn contact_reports_become_start_drag_release() {
        let now = Instant::now();
        let held = KeyTable::new();
        let mut classifier = EventClassifier::new(3);

        let phases: Vec<TouchPhase> = classify_all(
            &mut classifier,
            &held,
            &[
                RawSample::contact(10, 20, false, now),
                RawSample::contact(10, 20, true, now),
                RawSample::contact(12, 30, true, now),
                RawSample::contact(12, 30, false, now),
                RawSample::contact(40, 50, true, now),
            ],
        )
        .into_iter()
        .map(|c| match c.event {
            UiEvent::Touch(t) => t.phase,
            other => panic!("unexpected {:?}", other),
        })
        .collect();

        assert_eq!(
            phases,
            vec![TouchPhase::Start, TouchPhase::Drag, TouchPhase::Release, TouchPhase::Start]
        );
        assert!(classifier.is_touching());
        assert!(held.held().is_empty());
    }
}
