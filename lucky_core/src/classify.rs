use serde::{Deserialize, Serialize};

use crate::numbers::{is_odd, is_valid_number, SLOT_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    Consecutive,
    AllEven,
    AllOdd,
    OneOdd,
    TwoOdd,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Consecutive,
        Pattern::AllEven,
        Pattern::AllOdd,
        Pattern::OneOdd,
        Pattern::TwoOdd,
    ];

    /// Stable identifier, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Pattern::Consecutive => "consecutive",
            Pattern::AllEven => "all-even",
            Pattern::AllOdd => "all-odd",
            Pattern::OneOdd => "one-odd",
            Pattern::TwoOdd => "two-odd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pattern::Consecutive => "Consecutive numbers",
            Pattern::AllEven => "All even",
            Pattern::AllOdd => "All odd",
            Pattern::OneOdd => "One odd",
            Pattern::TwoOdd => "Two odd",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Pattern::Consecutive => "Consecutive numbers! Great choice!",
            Pattern::AllEven => "All even numbers! Balanced choice!",
            Pattern::AllOdd => "All odd numbers! Strong choice!",
            Pattern::OneOdd | Pattern::TwoOdd => "Unique choice!",
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("{0} is out of range (pick from 1-6)")]
    OutOfRange(u8),
    #[error("{0} appears more than once")]
    Duplicate(u8),
}

/// Final score of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub numbers: [u8; SLOT_COUNT],
    pub total: u8,
    pub pattern: Pattern,
}

impl GameResult {
    pub fn message(&self) -> String {
        format!("{} Total: {}", self.pattern.message(), self.total)
    }
}

fn is_run(numbers: &[u8; SLOT_COUNT]) -> bool {
    let mut sorted = *numbers;
    sorted.sort_unstable();
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}

fn pattern_of(numbers: &[u8; SLOT_COUNT]) -> Pattern {
    if is_run(numbers) {
        return Pattern::Consecutive;
    }
    match numbers.iter().filter(|&&n| is_odd(n)).count() {
        0 => Pattern::AllEven,
        1 => Pattern::OneOdd,
        2 => Pattern::TwoOdd,
        _ => Pattern::AllOdd,
    }
}

/// Scores three distinct picks. Order is preserved in the result.
pub fn classify(numbers: [u8; SLOT_COUNT]) -> Result<GameResult, ClassifyError> {
    for (i, &n) in numbers.iter().enumerate() {
        if !is_valid_number(n) {
            return Err(ClassifyError::OutOfRange(n));
        }
        if numbers[..i].contains(&n) {
            return Err(ClassifyError::Duplicate(n));
        }
    }
    Ok(GameResult {
        numbers,
        total: numbers.iter().sum(),
        pattern: pattern_of(&numbers),
    })
}
