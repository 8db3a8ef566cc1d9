pub mod classify;
pub mod numbers;
pub mod reel;
pub mod rng;
pub mod session;
pub mod suggest;

pub use crate::classify::{classify, ClassifyError, GameResult, Pattern};
pub use crate::numbers::{GameState, FACES, MAX_NUMBER, MIN_NUMBER, SLOT_COUNT};
pub use crate::reel::{ReelAnimator, ReelDisplay, ReelPhase, RollTiming, TimingError};
pub use crate::rng::{draw_unpicked, NumberSource, SeededSource, TimestampHashSource};
pub use crate::session::{AutoOutcome, GameSession, SelectionError, SessionEvent, SessionTiming};
pub use crate::suggest::{random_suggestion, smart_suggestion};
