use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::numbers::MAX_NUMBER;

// Candidate generation for automatic picks. The timestamp-hash source is not
// uniform and not secure; it exists so rolls stay reproducible from the same
// clock reading and auxiliary draw.

/// Collision retries before falling back to a uniform pick among the remaining numbers.
pub const MAX_ATTEMPTS: usize = 100;

/// Something that can propose die faces.
pub trait NumberSource {
    /// A candidate in `1..=6`. May collide with numbers already picked.
    fn candidate(&mut self) -> u8;

    /// Uniform choice among `remaining`; `None` when it is empty.
    fn choose(&mut self, remaining: &[u8]) -> Option<u8>;
}

impl<T: NumberSource + ?Sized> NumberSource for Box<T> {
    fn candidate(&mut self) -> u8 {
        (**self).candidate()
    }

    fn choose(&mut self, remaining: &[u8]) -> Option<u8> {
        (**self).choose(remaining)
    }
}

/// Wall-clock readings folded into the timestamp hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockComponents {
    pub timestamp_ms: i64,
    pub second: u32,
    pub minute: u32,
    pub hour: u32,
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl ClockComponents {
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            timestamp_ms: dt.timestamp_millis(),
            second: dt.second(),
            minute: dt.minute(),
            hour: dt.hour(),
            day: dt.day(),
            month: dt.month(),
            year: dt.year(),
        }
    }

    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn high_digits(&self) -> i64 {
        self.timestamp_ms / 1_000_000
    }

    pub fn low_digits(&self) -> i64 {
        self.timestamp_ms % 1_000_000
    }
}

/// Concatenates the decimal forms of every clock component and the auxiliary draw.
pub fn seed_text(clock: &ClockComponents, aux: f64) -> String {
    format!(
        "{}{}{}{}{}{}{}{}{}{}",
        clock.timestamp_ms,
        clock.second,
        clock.minute,
        clock.hour,
        clock.day,
        clock.month,
        clock.year,
        clock.high_digits(),
        clock.low_digits(),
        aux
    )
}

/// Rolling `h * 31 + byte` fold with 32-bit wrap-around.
pub fn fold_hash(text: &str) -> i32 {
    text.bytes()
        .fold(0i32, |h, b| h.wrapping_mul(31).wrapping_add(b as i32))
}

pub fn hash_to_number(hash: i32) -> u8 {
    (hash.unsigned_abs() % MAX_NUMBER as u32) as u8 + 1
}

/// Default source: hashes the current local time together with one `thread_rng` draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampHashSource;

impl TimestampHashSource {
    pub fn candidate_at(clock: &ClockComponents, aux: f64) -> u8 {
        hash_to_number(fold_hash(&seed_text(clock, aux)))
    }
}

impl NumberSource for TimestampHashSource {
    fn candidate(&mut self) -> u8 {
        let aux: f64 = rand::thread_rng().gen();
        Self::candidate_at(&ClockComponents::now(), aux)
    }

    fn choose(&mut self, remaining: &[u8]) -> Option<u8> {
        remaining.choose(&mut rand::thread_rng()).copied()
    }
}

/// Reproducible uniform source for tests and `--seed` sessions.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NumberSource for SeededSource {
    fn candidate(&mut self) -> u8 {
        self.rng.gen_range(1..=MAX_NUMBER)
    }

    fn choose(&mut self, remaining: &[u8]) -> Option<u8> {
        remaining.choose(&mut self.rng).copied()
    }
}

/// Draws a number not in `selected`, retrying up to [`MAX_ATTEMPTS`] times
/// before picking uniformly from `remaining`.
pub fn draw_unpicked<S: NumberSource + ?Sized>(
    source: &mut S,
    selected: &[u8],
    remaining: &[u8],
) -> Option<u8> {
    for _ in 0..MAX_ATTEMPTS {
        let n = source.candidate();
        if !selected.contains(&n) {
            return Some(n);
        }
    }
    debug!(?selected, "candidate retries exhausted, choosing uniformly");
    source.choose(remaining)
}
