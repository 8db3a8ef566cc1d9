// Per-slot reel: idle -> rolling -> locked, driven by its owner with explicit ms timestamps.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::numbers::FACES;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("slow-down checkpoints must be in increasing order")]
    UnorderedCheckpoints,
}

/// Frame pacing for a rolling reel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTiming {
    /// Frame interval right after the roll starts.
    pub initial_frame_ms: u64,
    /// `(elapsed_ms, frame_ms)`: once `elapsed_ms` has passed since the start,
    /// frames are spaced `frame_ms` apart.
    pub checkpoints: Vec<(u64, u64)>,
    /// Window before the lock in which the target face is never shown.
    pub suspense_window_ms: u64,
}

impl Default for RollTiming {
    fn default() -> Self {
        Self {
            initial_frame_ms: 50,
            checkpoints: vec![(1_000, 80), (2_500, 150), (3_800, 250)],
            suspense_window_ms: 200,
        }
    }
}

impl RollTiming {
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.initial_frame_ms == 0 {
            return Err(TimingError::Zero("initial_frame_ms"));
        }
        if self.checkpoints.iter().any(|&(_, frame)| frame == 0) {
            return Err(TimingError::Zero("checkpoint frame_ms"));
        }
        if self.checkpoints.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(TimingError::UnorderedCheckpoints);
        }
        Ok(())
    }

    /// Frame interval in effect `elapsed_ms` after the roll started.
    pub fn frame_ms(&self, elapsed_ms: u64) -> u64 {
        self.checkpoints
            .iter()
            .rev()
            .find(|&&(at, _)| elapsed_ms >= at)
            .map(|&(_, frame)| frame)
            .unwrap_or(self.initial_frame_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReelPhase {
    Idle,
    Rolling,
    Locked,
}

/// What a front end needs to draw one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelDisplay {
    pub digit: Option<u8>,
    pub rolling: bool,
    pub completed: bool,
    pub final_digit: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct ReelAnimator {
    timing: RollTiming,
    phase: ReelPhase,
    shown: Option<u8>,
    target: Option<u8>,
    cycle_index: usize,
    started_at_ms: u64,
    lock_at_ms: u64,
    next_frame_at_ms: u64,
}

impl ReelAnimator {
    pub fn new(timing: RollTiming) -> Self {
        Self {
            timing,
            phase: ReelPhase::Idle,
            shown: None,
            target: None,
            cycle_index: 0,
            started_at_ms: 0,
            lock_at_ms: 0,
            next_frame_at_ms: 0,
        }
    }

    pub fn phase(&self) -> ReelPhase {
        self.phase
    }

    pub fn shown(&self) -> Option<u8> {
        self.shown
    }

    /// Scheduled lock time of the current roll.
    pub fn lock_at_ms(&self) -> Option<u64> {
        (self.phase == ReelPhase::Rolling).then_some(self.lock_at_ms)
    }

    pub fn display(&self) -> ReelDisplay {
        ReelDisplay {
            digit: self.shown,
            rolling: self.phase == ReelPhase::Rolling,
            completed: self.phase == ReelPhase::Locked,
            final_digit: match self.phase {
                ReelPhase::Locked => self.target,
                _ => None,
            },
        }
    }

    /// Starts rolling towards `target`. Ignored unless the reel is idle.
    pub fn on_animation_start(&mut self, target: u8, now_ms: u64, lock_at_ms: u64) -> bool {
        if self.phase != ReelPhase::Idle {
            return false;
        }
        self.phase = ReelPhase::Rolling;
        self.target = Some(target);
        self.cycle_index = 0;
        self.started_at_ms = now_ms;
        self.lock_at_ms = lock_at_ms.max(now_ms);
        self.next_frame_at_ms = now_ms + self.timing.frame_ms(0);
        if self.in_suspense(now_ms) && FACES[0] == target {
            self.advance();
        }
        self.shown = Some(FACES[self.cycle_index]);
        trace!(target, now_ms, lock_at_ms, "reel rolling");
        true
    }

    fn in_suspense(&self, now_ms: u64) -> bool {
        now_ms.saturating_add(self.timing.suspense_window_ms) >= self.lock_at_ms
    }

    fn advance(&mut self) {
        self.cycle_index = (self.cycle_index + 1) % FACES.len();
    }

    /// Advances the decoy cycle. Returns the new face when it changed.
    pub fn on_tick(&mut self, now_ms: u64) -> Option<u8> {
        if self.phase != ReelPhase::Rolling {
            return None;
        }
        let before = self.shown;
        if now_ms >= self.next_frame_at_ms {
            self.advance();
            let elapsed = now_ms.saturating_sub(self.started_at_ms);
            self.next_frame_at_ms = now_ms + self.timing.frame_ms(elapsed);
        }
        if self.in_suspense(now_ms) && Some(FACES[self.cycle_index]) == self.target {
            self.advance();
        }
        self.shown = Some(FACES[self.cycle_index]);
        (self.shown != before).then_some(FACES[self.cycle_index])
    }

    /// Snaps to the target and freezes. Only a rolling reel can lock.
    pub fn on_lock(&mut self) -> Option<u8> {
        if self.phase != ReelPhase::Rolling {
            return None;
        }
        self.phase = ReelPhase::Locked;
        self.shown = self.target;
        trace!(target = ?self.target, "reel locked");
        self.target
    }

    /// Back to idle; any roll in flight is dropped.
    pub fn reset(&mut self) {
        *self = Self::new(self.timing.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reel() -> ReelAnimator {
        ReelAnimator::new(RollTiming::default())
    }

    #[test]
    fn frame_interval_slows_at_checkpoints() {
        let t = RollTiming::default();
        assert_eq!(t.frame_ms(0), 50);
        assert_eq!(t.frame_ms(999), 50);
        assert_eq!(t.frame_ms(1_000), 80);
        assert_eq!(t.frame_ms(3_000), 150);
        assert_eq!(t.frame_ms(10_000), 250);
    }

    #[test]
    fn validate_rejects_bad_timing() {
        assert!(RollTiming::default().validate().is_ok());
        let zero = RollTiming {
            initial_frame_ms: 0,
            ..RollTiming::default()
        };
        assert_eq!(zero.validate(), Err(TimingError::Zero("initial_frame_ms")));
        let unordered = RollTiming {
            checkpoints: vec![(500, 80), (400, 90)],
            ..RollTiming::default()
        };
        assert_eq!(unordered.validate(), Err(TimingError::UnorderedCheckpoints));
    }

    #[test]
    fn idle_reel_ignores_ticks_and_locks() {
        let mut r = reel();
        assert_eq!(r.on_tick(100), None);
        assert_eq!(r.on_lock(), None);
        assert_eq!(r.phase(), ReelPhase::Idle);
        assert_eq!(r.display().digit, None);
    }

    #[test]
    fn rolling_cycles_faces() {
        let mut r = reel();
        assert!(r.on_animation_start(4, 0, 5_000));
        assert_eq!(r.shown(), Some(1));
        assert_eq!(r.on_tick(10), None);
        assert_eq!(r.on_tick(50), Some(2));
        assert_eq!(r.on_tick(100), Some(3));
        assert!(r.display().rolling);
    }

    #[test]
    fn suspense_window_never_shows_target() {
        for target in FACES {
            let mut r = reel();
            r.on_animation_start(target, 0, 2_000);
            let mut now = 1_800;
            while now < 2_000 {
                r.on_tick(now);
                assert_ne!(r.shown(), Some(target), "target {target} shown at {now}");
                now += 10;
            }
            assert_eq!(r.on_lock(), Some(target));
            assert_eq!(r.shown(), Some(target));
        }
    }

    #[test]
    fn short_roll_starts_on_a_decoy() {
        for target in FACES {
            let mut r = reel();
            r.on_animation_start(target, 0, 150);
            assert_ne!(r.shown(), Some(target));
            r.on_tick(100);
            assert_ne!(r.shown(), Some(target));
            assert_eq!(r.on_lock(), Some(target));
        }
    }

    #[test]
    fn locked_reel_is_sticky_until_reset() {
        let mut r = reel();
        r.on_animation_start(5, 0, 1_000);
        r.on_lock();
        assert!(!r.on_animation_start(2, 1_100, 2_000));
        assert_eq!(r.on_tick(1_500), None);
        let d = r.display();
        assert!(d.completed);
        assert_eq!(d.final_digit, Some(5));
        assert_eq!(d.digit, Some(5));

        r.reset();
        assert_eq!(r.phase(), ReelPhase::Idle);
        assert_eq!(r.display().digit, None);
        assert!(r.on_animation_start(2, 2_000, 3_000));
    }
}
