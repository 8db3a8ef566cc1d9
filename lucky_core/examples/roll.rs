use lucky_core::{AutoOutcome, GameSession, SessionEvent, SessionTiming};

fn main() {
    // Three automatic rolls with a fixed seed, stepping the clock by hand
    let mut session = GameSession::with_seed(7, SessionTiming::default()).expect("default timing");
    let mut now = 0u64;
    while !session.state().is_complete {
        if let Ok(AutoOutcome::Rolling { slot, commit_at_ms, .. }) = session.auto_select(now) {
            while now < commit_at_ms {
                now += 50;
                for event in session.tick(now) {
                    if let SessionEvent::ReelFrame { slot: s, digit } = event {
                        if s == slot {
                            print!("{digit}");
                        }
                    }
                }
            }
            println!();
        }
    }
    if let Some(result) = session.result() {
        println!(
            "numbers={:?} total={} pattern={} message={}",
            result.numbers,
            result.total,
            result.pattern,
            result.message()
        );
    }
}
