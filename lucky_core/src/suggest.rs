use crate::numbers::GameState;
use crate::rng::NumberSource;

/// Any still-available number, uniformly.
pub fn random_suggestion<S: NumberSource + ?Sized>(state: &GameState, source: &mut S) -> Option<u8> {
    if state.is_complete {
        return None;
    }
    source.choose(&state.remaining())
}

/// A number that balances the picks so far: 3 to open, then the opposite half
/// of the die from the first pick, then anything left.
pub fn smart_suggestion<S: NumberSource + ?Sized>(state: &GameState, source: &mut S) -> Option<u8> {
    let available = state.remaining();
    if state.is_complete || available.is_empty() {
        return None;
    }
    match state.selected_numbers.as_slice() {
        [] if available.contains(&3) => Some(3),
        [first] => {
            let low_first = *first <= 3;
            let other_half: Vec<u8> = available
                .iter()
                .copied()
                .filter(|&n| (n > 3) == low_first)
                .collect();
            if other_half.is_empty() {
                source.choose(&available)
            } else {
                source.choose(&other_half)
            }
        }
        _ => source.choose(&available),
    }
}
