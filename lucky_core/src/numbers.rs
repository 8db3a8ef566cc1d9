use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Smallest pickable number.
pub const MIN_NUMBER: u8 = 1;
/// Largest pickable number.
pub const MAX_NUMBER: u8 = 6;
/// Numbers picked per game, one per reel slot.
pub const SLOT_COUNT: usize = 3;

/// Every face of the die, in the order the reels cycle through them.
pub const FACES: [u8; 6] = [1, 2, 3, 4, 5, 6];

pub fn is_valid_number(n: u8) -> bool {
    (MIN_NUMBER..=MAX_NUMBER).contains(&n)
}

pub fn is_odd(n: u8) -> bool {
    n % 2 == 1
}

/// Selection progress of one game.
///
/// `current_step` is 1-based: it names the slot the next pick will fill, and
/// goes to 4 once all three slots are filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_step: u8,
    pub selected_numbers: Vec<u8>,
    pub available_numbers: BTreeSet<u8>,
    pub is_complete: bool,
    pub is_auto_mode: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_step: 1,
            selected_numbers: Vec::with_capacity(SLOT_COUNT),
            available_numbers: FACES.iter().copied().collect(),
            is_complete: false,
            is_auto_mode: false,
        }
    }
}

impl GameState {
    pub fn is_selected(&self, n: u8) -> bool {
        self.selected_numbers.contains(&n)
    }

    /// Slot index (0-based) the next pick lands in, if any slot is left.
    pub fn next_slot(&self) -> Option<usize> {
        let filled = self.selected_numbers.len();
        (filled < SLOT_COUNT).then_some(filled)
    }

    pub fn remaining(&self) -> Vec<u8> {
        self.available_numbers.iter().copied().collect()
    }

    /// Appends `n` and re-derives the step, availability and completion flag.
    /// Nothing is available once the game is complete. Callers validate `n` first.
    pub(crate) fn commit(&mut self, n: u8) {
        self.selected_numbers.push(n);
        self.available_numbers.remove(&n);
        self.current_step = self.selected_numbers.len() as u8 + 1;
        self.is_complete = self.current_step as usize > SLOT_COUNT;
        if self.is_complete {
            self.available_numbers.clear();
        }
    }

    /// The three picks in selection order, once the game is complete.
    pub fn picks(&self) -> Option<[u8; SLOT_COUNT]> {
        <[u8; SLOT_COUNT]>::try_from(self.selected_numbers.as_slice()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_every_face_available() {
        let state = GameState::default();
        assert_eq!(state.current_step, 1);
        assert_eq!(state.remaining(), FACES.to_vec());
        assert_eq!(state.next_slot(), Some(0));
        assert!(state.picks().is_none());
    }

    #[test]
    fn commit_keeps_step_and_availability_in_sync() {
        let mut state = GameState::default();
        state.commit(4);
        state.commit(1);
        assert_eq!(state.current_step, 3);
        assert_eq!(state.remaining(), vec![2, 3, 5, 6]);
        assert!(!state.is_complete);
        state.commit(6);
        assert!(state.is_complete);
        assert!(state.available_numbers.is_empty());
        assert_eq!(state.next_slot(), None);
        assert_eq!(state.picks(), Some([4, 1, 6]));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(GameState::default()).unwrap();
        assert_eq!(json["currentStep"], 1);
        assert_eq!(json["isAutoMode"], false);
        assert_eq!(json["availableNumbers"].as_array().unwrap().len(), 6);
    }
}
