// Nothing here sleeps: callers pass `now_ms` and call `tick` periodically.
// Dropping the pending timers on reset is what cancels a roll in flight.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    classify::{classify, GameResult},
    numbers::{is_valid_number, GameState, SLOT_COUNT},
    reel::{ReelAnimator, ReelDisplay, RollTiming, TimingError},
    rng::{draw_unpicked, NumberSource, SeededSource, TimestampHashSource},
    suggest::smart_suggestion,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTiming {
    /// Delay between the third manual pick and the result.
    pub result_delay_ms: u64,
    /// Length of an automatic roll before its number is committed.
    pub auto_commit_delay_ms: u64,
    pub roll: RollTiming,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            result_delay_ms: 2_000,
            auto_commit_delay_ms: 5_000,
            roll: RollTiming::default(),
        }
    }
}

impl SessionTiming {
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.result_delay_ms == 0 {
            return Err(TimingError::Zero("result_delay_ms"));
        }
        if self.auto_commit_delay_ms == 0 {
            return Err(TimingError::Zero("auto_commit_delay_ms"));
        }
        self.roll.validate()
    }
}

/// Why a pick was refused. The message is shown to the player as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("{0} is invalid (select from 1-6)")]
    OutOfRange(u8),
    #[error("{0} is already selected")]
    AlreadySelected(u8),
    #[error("already selected 3 numbers")]
    SelectionFull,
    #[error("a roll is already in progress")]
    AutoRollInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    LockReel { slot: usize },
    Commit { slot: usize, number: u8 },
    Reveal,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due_ms: u64,
    timer: Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    ReelFrame { slot: usize, digit: u8 },
    ReelLocked { slot: usize, digit: u8 },
    NumberCommitted { slot: usize, number: u8 },
    ResultReady { result: GameResult },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoOutcome {
    /// A roll started; `number` is committed to `slot` at `commit_at_ms`.
    Rolling {
        slot: usize,
        number: u8,
        commit_at_ms: u64,
    },
    /// The game was already complete; this is its result.
    Replayed(GameResult),
}

#[derive(Debug, Clone)]
pub struct GameSession<S = TimestampHashSource> {
    source: S,
    timing: SessionTiming,
    state: GameState,
    result: Option<GameResult>,
    reels: [ReelAnimator; SLOT_COUNT],
    pending: Vec<Pending>,
}

impl Default for GameSession<TimestampHashSource> {
    fn default() -> Self {
        Self::build(TimestampHashSource, SessionTiming::default())
    }
}

impl GameSession<SeededSource> {
    pub fn with_seed(seed: u64, timing: SessionTiming) -> Result<Self, TimingError> {
        Self::new(SeededSource::new(seed), timing)
    }
}

impl<S: NumberSource> GameSession<S> {
    pub fn new(source: S, timing: SessionTiming) -> Result<Self, TimingError> {
        timing.validate()?;
        Ok(Self::build(source, timing))
    }

    fn build(source: S, timing: SessionTiming) -> Self {
        let reel = ReelAnimator::new(timing.roll.clone());
        Self {
            source,
            state: GameState::default(),
            result: None,
            reels: [reel.clone(), reel.clone(), reel],
            pending: Vec::new(),
            timing,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn timing(&self) -> &SessionTiming {
        &self.timing
    }

    pub fn reel(&self, slot: usize) -> Option<&ReelAnimator> {
        self.reels.get(slot)
    }

    pub fn reel_displays(&self) -> [ReelDisplay; SLOT_COUNT] {
        [
            self.reels[0].display(),
            self.reels[1].display(),
            self.reels[2].display(),
        ]
    }

    /// True while a lock, commit or reveal timer is still pending.
    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn suggestion(&mut self) -> Option<u8> {
        smart_suggestion(&self.state, &mut self.source)
    }

    fn schedule(&mut self, due_ms: u64, timer: Timer) {
        self.pending.push(Pending { due_ms, timer });
    }

    fn compute_result(&mut self) -> Option<GameResult> {
        let picks = self.state.picks()?;
        match classify(picks) {
            Ok(result) => {
                self.result = Some(result);
                Some(result)
            }
            Err(err) => {
                warn!(?picks, %err, "completed selection did not classify");
                None
            }
        }
    }

    /// Manual pick for the next slot.
    pub fn select_number(&mut self, n: u8, now_ms: u64) -> Result<usize, SelectionError> {
        if self.state.is_auto_mode {
            return Err(SelectionError::AutoRollInProgress);
        }
        if !is_valid_number(n) {
            return Err(SelectionError::OutOfRange(n));
        }
        if self.state.is_selected(n) {
            return Err(SelectionError::AlreadySelected(n));
        }
        let slot = self.state.next_slot().ok_or(SelectionError::SelectionFull)?;

        self.state.commit(n);
        let settle_at = now_ms + self.timing.result_delay_ms;
        self.reels[slot].on_animation_start(n, now_ms, settle_at);
        self.schedule(settle_at, Timer::LockReel { slot });
        if self.state.is_complete {
            self.schedule(settle_at, Timer::Reveal);
        }
        debug!(slot, number = n, step = self.state.current_step, "number selected");
        Ok(slot)
    }

    /// Rolls the next slot automatically, or replays the result of a finished game.
    pub fn auto_select(&mut self, now_ms: u64) -> Result<AutoOutcome, SelectionError> {
        if self.state.is_complete {
            self.pending.retain(|p| p.timer != Timer::Reveal);
            let result = match self.result {
                Some(result) => result,
                None => self.compute_result().ok_or(SelectionError::SelectionFull)?,
            };
            return Ok(AutoOutcome::Replayed(result));
        }
        if self.state.is_auto_mode {
            return Err(SelectionError::AutoRollInProgress);
        }
        let slot = self.state.next_slot().ok_or(SelectionError::SelectionFull)?;
        let number = draw_unpicked(
            &mut self.source,
            &self.state.selected_numbers,
            &self.state.remaining(),
        )
        .ok_or(SelectionError::SelectionFull)?;

        self.state.is_auto_mode = true;
        let commit_at_ms = now_ms + self.timing.auto_commit_delay_ms;
        self.reels[slot].on_animation_start(number, now_ms, commit_at_ms);
        self.schedule(commit_at_ms, Timer::Commit { slot, number });
        debug!(slot, number, commit_at_ms, "auto roll started");
        Ok(AutoOutcome::Rolling {
            slot,
            number,
            commit_at_ms,
        })
    }

    fn fire(&mut self, timer: Timer, events: &mut Vec<SessionEvent>) {
        match timer {
            Timer::LockReel { slot } => {
                if let Some(digit) = self.reels[slot].on_lock() {
                    events.push(SessionEvent::ReelLocked { slot, digit });
                }
            }
            Timer::Commit { slot, number } => {
                self.state.commit(number);
                self.state.is_auto_mode = false;
                events.push(SessionEvent::NumberCommitted { slot, number });
                if let Some(digit) = self.reels[slot].on_lock() {
                    events.push(SessionEvent::ReelLocked { slot, digit });
                }
                debug!(slot, number, step = self.state.current_step, "auto roll committed");
                if self.state.is_complete {
                    if let Some(result) = self.compute_result() {
                        events.push(SessionEvent::ResultReady { result });
                    }
                }
            }
            Timer::Reveal => {
                if self.result.is_none() {
                    if let Some(result) = self.compute_result() {
                        events.push(SessionEvent::ResultReady { result });
                    }
                }
            }
        }
    }

    /// Fires every timer due at `now_ms`, then advances the reels.
    pub fn tick(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by_key(|p| p.due_ms);
        for p in due {
            self.fire(p.timer, &mut events);
        }
        for (slot, reel) in self.reels.iter_mut().enumerate() {
            if let Some(digit) = reel.on_tick(now_ms) {
                events.push(SessionEvent::ReelFrame { slot, digit });
            }
        }
        events
    }

    /// Back to a fresh game. Pending timers are dropped with the state.
    pub fn reset(&mut self) {
        self.state = GameState::default();
        self.result = None;
        self.pending.clear();
        for reel in &mut self.reels {
            reel.reset();
        }
        debug!("session reset");
    }
}
