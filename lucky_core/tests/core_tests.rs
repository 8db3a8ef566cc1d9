use lucky_core::{
    classify, AutoOutcome, GameSession, GameState, Pattern, SeededSource, SelectionError,
    SessionEvent, SessionTiming, FACES,
};
use proptest::prelude::*;

fn session(seed: u64) -> GameSession<SeededSource> {
    GameSession::with_seed(seed, SessionTiming::default()).unwrap()
}

fn result_of(events: &[SessionEvent]) -> Option<lucky_core::GameResult> {
    events.iter().find_map(|e| match e {
        SessionEvent::ResultReady { result } => Some(*result),
        _ => None,
    })
}

#[test]
fn picks_2_4_6_score_all_even() {
    let mut s = session(1);
    s.select_number(2, 0).unwrap();
    s.select_number(4, 0).unwrap();
    s.select_number(6, 0).unwrap();
    let r = result_of(&s.tick(2_000)).unwrap();
    assert_eq!(r.numbers, [2, 4, 6]);
    assert_eq!(r.total, 12);
    assert_eq!(r.pattern, Pattern::AllEven);
}

#[test]
fn picks_1_2_3_score_consecutive() {
    let mut s = session(1);
    for n in [1, 2, 3] {
        s.select_number(n, 0).unwrap();
    }
    let r = result_of(&s.tick(2_000)).unwrap();
    assert_eq!(r.numbers, [1, 2, 3]);
    assert_eq!(r.total, 6);
    assert_eq!(r.pattern, Pattern::Consecutive);
}

#[test]
fn three_manual_picks_complete_the_game() {
    let mut s = session(2);
    for n in [5, 1, 4] {
        s.select_number(n, 0).unwrap();
    }
    assert!(s.state().is_complete);
    assert!(s.state().available_numbers.is_empty());
    assert_eq!(s.state().current_step, 4);
}

#[test]
fn reset_restores_fresh_game() {
    let mut s = session(3);
    s.select_number(3, 0).unwrap();
    s.auto_select(10).unwrap();
    s.tick(100);
    s.reset();
    let state = s.state();
    assert_eq!(state.current_step, 1);
    assert!(state.selected_numbers.is_empty());
    let all: std::collections::BTreeSet<u8> = FACES.iter().copied().collect();
    assert_eq!(state.available_numbers, all);
    assert!(!state.is_complete);
    assert!(!state.is_auto_mode);
    assert!(s.result().is_none());
}

#[test]
fn full_auto_game_uses_distinct_numbers() {
    for seed in 0..50 {
        let mut s = session(seed);
        let mut now = 0;
        while !s.state().is_complete {
            match s.auto_select(now).unwrap() {
                AutoOutcome::Rolling { commit_at_ms, .. } => {
                    now = commit_at_ms;
                    s.tick(now);
                }
                AutoOutcome::Replayed(_) => unreachable!("game not complete yet"),
            }
        }
        let picks = s.state().selected_numbers.clone();
        let mut dedup = picks.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), 3, "seed {seed} picked {picks:?}");
        assert!(matches!(s.auto_select(now), Ok(AutoOutcome::Replayed(_))));
    }
}

#[test]
fn every_subset_classifies() {
    let mut seen = std::collections::HashSet::new();
    for a in 1..=6u8 {
        for b in (a + 1)..=6 {
            for c in (b + 1)..=6 {
                let r = classify([a, b, c]).unwrap();
                assert_eq!(r.total, a + b + c);
                seen.insert(r.pattern);
            }
        }
    }
    assert_eq!(seen.len(), Pattern::ALL.len());
}

proptest! {
    #[test]
    fn duplicate_pick_never_grows_selection(picks in proptest::collection::vec(0u8..9, 1..12)) {
        let mut s = session(4);
        for n in picks {
            let before = s.state().selected_numbers.len();
            let already = s.state().is_selected(n);
            let res = s.select_number(n, 0);
            if already {
                prop_assert_eq!(res, Err(SelectionError::AlreadySelected(n)));
                prop_assert_eq!(s.state().selected_numbers.len(), before);
            }
            let state: &GameState = s.state();
            prop_assert_eq!(state.current_step as usize, state.selected_numbers.len() + 1);
            prop_assert_eq!(state.is_complete, state.current_step > 3);
            if state.is_complete {
                prop_assert!(state.available_numbers.is_empty());
            } else {
                prop_assert_eq!(state.available_numbers.len() + state.selected_numbers.len(), 6);
            }
        }
    }

    #[test]
    fn runs_win_over_parity(start in 1u8..=4, rot in 0usize..3) {
        let mut nums = [start, start + 1, start + 2];
        nums.rotate_left(rot);
        prop_assert_eq!(classify(nums).unwrap().pattern, Pattern::Consecutive);
    }
}
