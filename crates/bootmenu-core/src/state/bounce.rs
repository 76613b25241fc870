use std::time::{Duration, Instant};

/// Snap-back of an over-scrolled menu toward the nearest legal offset.
///
/// Each step shrinks the remaining gap linearly with elapsed time, so the
/// offset reaches the target exactly when the duration runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BounceAnimation {
    start_offset: i32,
    target_offset: i32,
    start: Instant,
    duration: Duration,
}

impl BounceAnimation {
    pub fn new(start_offset: i32, target_offset: i32, start: Instant, duration: Duration) -> Self {
        Self {
            start_offset,
            target_offset,
            start,
            duration,
        }
    }

    pub fn start_offset(&self) -> i32 {
        self.start_offset
    }

    pub fn target_offset(&self) -> i32 {
        self.target_offset
    }

    /// Next offset given the current one. The flag is true once finished.
    pub fn step(&self, current: i32, now: Instant) -> (i32, bool) {
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            return (self.target_offset, true);
        }

        let fraction = elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64;
        let remaining = (1.0 - fraction).max(0.0);
        let gap = f64::from(current - self.target_offset) * remaining;
        (self.target_offset + gap.round() as i32, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_decays_then_snaps() {
        let t0 = Instant::now();
        let bounce = BounceAnimation::new(-100, -60, t0, Duration::from_millis(200));

        assert_eq!(bounce.step(-100, t0), (-100, false));
        assert_eq!(bounce.step(-100, t0 + Duration::from_millis(50)), (-90, false));
        assert_eq!(bounce.step(-90, t0 + Duration::from_millis(150)), (-68, false));
        assert_eq!(bounce.step(-68, t0 + Duration::from_millis(200)), (-60, true));
        assert_eq!(bounce.step(-68, t0 + Duration::from_secs(5)), (-60, true));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let t0 = Instant::now();
        let bounce = BounceAnimation::new(25, 0, t0, Duration::ZERO);
        assert_eq!(bounce.step(25, t0), (0, true));
    }

    #[test]
    fn step_never_overshoots_target() {
        let t0 = Instant::now();
        let bounce = BounceAnimation::new(40, 0, t0, Duration::from_millis(200));
        let mut offset = 40;
        for ms in (0..=200).step_by(16) {
            let (next, _) = bounce.step(offset, t0 + Duration::from_millis(ms));
            assert!((0..=offset).contains(&next));
            offset = next;
        }
    }
}
