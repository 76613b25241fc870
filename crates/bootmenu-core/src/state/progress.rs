use std::time::{Duration, Instant};

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressKind {
    #[default]
    None,
    Indeterminate,
    Determinate,
}

/// Progress bar split into consecutive scopes.
///
/// Each `show_scope` call appends a scope of the given portion after the
/// previous one, and fractions passed to `set_fraction` are relative to the
/// current scope. A scope with a duration advances on its own from the
/// progress thread.
#[derive(Debug, Clone)]
pub struct ProgressState {
    kind: ProgressKind,
    scope_start: f32,
    scope_size: f32,
    progress: f32,
    scope_time: Option<Instant>,
    scope_duration: Duration,
    percent: f32,
    frame: usize,
    frames: usize,
    bar_width: i32,
}

impl ProgressState {
    pub fn new(bar_width: i32, frames: usize) -> Self {
        Self {
            kind: ProgressKind::None,
            scope_start: 0.0,
            scope_size: 0.0,
            progress: 0.0,
            scope_time: None,
            scope_duration: Duration::ZERO,
            percent: 0.0,
            frame: 0,
            frames: frames.max(1),
            bar_width,
        }
    }

    pub fn kind(&self) -> ProgressKind {
        self.kind
    }

    /// Fraction of the current scope that is done
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Overall completed fraction of the bar
    pub fn position(&self) -> f32 {
        self.scope_start + self.progress * self.scope_size
    }

    /// Filled pixels for a bar `width` pixels wide
    pub fn fill_width(&self, width: i32) -> i32 {
        ((self.position() * width as f32) as i32).clamp(0, width.max(0))
    }

    fn auto_advancing(&self) -> bool {
        self.kind == ProgressKind::Determinate && !self.scope_duration.is_zero()
    }

    pub fn show_indeterminate(&mut self) -> bool {
        if self.kind == ProgressKind::Indeterminate {
            return false;
        }
        self.kind = ProgressKind::Indeterminate;
        true
    }

    /// Open the next scope covering `portion` of the bar
    pub fn show_scope(&mut self, portion: f32, seconds: u64, now: Instant) {
        self.kind = ProgressKind::Determinate;
        self.scope_start += self.scope_size;
        self.scope_size = portion;
        self.scope_time = Some(now);
        self.scope_duration = Duration::from_secs(seconds);
        self.progress = 0.0;
        self.percent = self.scope_start;
    }

    /// Set progress within the current scope. Returns true if the bar moved.
    ///
    /// While the scope auto-advances, progress only moves forward and changes
    /// smaller than a pixel are skipped.
    pub fn set_fraction(&mut self, fraction: f32) -> bool {
        let fraction = fraction.clamp(0.0, 1.0);
        self.percent = self.scope_start + fraction * self.scope_size;
        if self.kind != ProgressKind::Determinate {
            return false;
        }

        if !self.auto_advancing() {
            let changed = fraction != self.progress;
            self.progress = fraction;
            return changed;
        }

        if fraction <= self.progress {
            return false;
        }
        if self.bar_width > 0 {
            let scale = self.bar_width as f32 * self.scope_size;
            if (self.progress * scale) as i32 == (fraction * scale) as i32 {
                return false;
            }
        }
        self.progress = fraction;
        true
    }

    pub fn set(
        &mut self,
        kind: ProgressKind,
        fraction: f32,
        seconds: u64,
        now: Instant,
    ) -> bool {
        match kind {
            ProgressKind::None => {
                self.reset();
                true
            }
            ProgressKind::Indeterminate => self.show_indeterminate(),
            ProgressKind::Determinate => {
                let duration = Duration::from_secs(seconds);
                if self.kind != ProgressKind::Determinate {
                    self.kind = ProgressKind::Determinate;
                    self.scope_start = 0.0;
                    self.scope_size = 1.0;
                    self.progress = 0.0;
                    self.percent = 0.0;
                    self.scope_time = Some(now);
                    self.scope_duration = duration;
                } else if self.scope_duration != duration {
                    self.scope_time = Some(now);
                    self.scope_duration = duration;
                }
                self.set_fraction(fraction)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.bar_width, self.frames);
    }

    /// Advance the animation frame or the timed scope. Returns true when the
    /// visible bar changed.
    pub fn tick(&mut self, now: Instant, show_text: bool) -> bool {
        match self.kind {
            ProgressKind::None => false,
            ProgressKind::Indeterminate => {
                if show_text {
                    return false;
                }
                self.frame = (self.frame + 1) % self.frames;
                true
            }
            ProgressKind::Determinate => {
                let Some(started) = self.scope_time.filter(|_| self.auto_advancing()) else {
                    return false;
                };

                let elapsed = now.saturating_duration_since(started);
                let target =
                    (elapsed.as_secs_f32() / self.scope_duration.as_secs_f32()).min(1.0);
                if target <= self.progress {
                    return false;
                }

                let before = self.fill_width(self.bar_width);
                self.progress = target;
                self.percent = self.position();
                let after = self.fill_width(self.bar_width);
                trace!(progress = self.progress, before, after, "progress advanced");
                self.bar_width == 0 || before != after
            }
        }
    }
}
