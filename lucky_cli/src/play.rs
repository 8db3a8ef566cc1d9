use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use lucky_core::{AutoOutcome, GameResult, GameSession, NumberSource, SessionEvent};
use lucky_shared::{parse_pick, primary_action_label, Notice, ResultModal};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::render;

pub type Session = GameSession<Box<dyn NumberSource>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Primary,
    Pick(String),
    Hint,
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "roll" | "r" => Command::Primary,
        "hint" | "h" => Command::Hint,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Pick(other.to_string()),
    }
}

/// A session plus the wall clock that drives it.
struct Table {
    session: Session,
    clock: Instant,
    quiet: bool,
}

impl Table {
    fn new(session: Session, quiet: bool) -> Self {
        Self {
            session,
            clock: Instant::now(),
            quiet,
        }
    }

    fn now_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    fn draw(&self) {
        if self.quiet {
            return;
        }
        let line = render::reels_line(&self.session.reel_displays());
        let label = primary_action_label(self.session.state());
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\r\x1b[2K{line}   {label} > ");
        let _ = out.flush();
    }

    fn notice(&self, notice: Notice) {
        println!("\n[{}] {}", notice.title, notice.body);
        self.draw();
    }

    /// Advances the session; returns the result when it became ready.
    fn step(&mut self) -> Option<GameResult> {
        let now = self.now_ms();
        let events = self.session.tick(now);
        if events.is_empty() {
            return None;
        }
        self.draw();
        events.into_iter().find_map(|e| match e {
            SessionEvent::ResultReady { result } => Some(result),
            _ => None,
        })
    }

    fn primary(&mut self) -> Option<GameResult> {
        let now = self.now_ms();
        match self.session.auto_select(now) {
            Ok(AutoOutcome::Rolling { slot, .. }) => {
                debug!(slot, "rolling");
                self.draw();
                None
            }
            Ok(AutoOutcome::Replayed(result)) => Some(result),
            Err(err) => {
                self.notice(err.into());
                None
            }
        }
    }

    fn pick(&mut self, input: &str) {
        let now = self.now_ms();
        let picked = parse_pick(input).and_then(|n| Ok(self.session.select_number(n, now)?));
        match picked {
            Ok(_) => self.draw(),
            Err(lucky_shared::FrontendError::Selection(err)) => self.notice(err.into()),
            Err(err) => self.notice(Notice {
                title: "Invalid input".into(),
                body: err.to_string(),
            }),
        }
    }

    fn show_result(&self, result: &GameResult) {
        println!("\n{}", render::modal(&ResultModal::from(result)));
        println!("Type 'reset' to play again.");
        self.draw();
    }
}

/// Interactive game on stdin/stdout.
pub async fn play(session: Session, frame: Duration, banner: Option<String>) -> anyhow::Result<()> {
    let mut table = Table::new(session, false);
    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    match banner {
        Some(banner) => print!("{banner}"),
        None => println!("{}\nLucky Dice: pick 3 numbers from 1-6\n{}", render::RULE, render::RULE),
    }
    println!("{}", render::HELP);
    table.draw();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(result) = table.step() {
                    table.show_result(&result);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                match parse_command(&line) {
                    Command::Primary => {
                        if let Some(result) = table.primary() {
                            table.show_result(&result);
                        }
                    }
                    Command::Pick(input) => table.pick(&input),
                    Command::Hint => {
                        let hint = table.session.suggestion();
                        match hint {
                            Some(n) => println!("Suggestion: {n}"),
                            None => println!("No numbers left to suggest."),
                        }
                        table.draw();
                    }
                    Command::Reset => {
                        table.session.reset();
                        info!("game reset");
                        println!();
                        table.draw();
                    }
                    Command::Help => {
                        println!("\n{}", render::HELP);
                        table.draw();
                    }
                    Command::Quit => break,
                }
            }
        }
    }
    println!();
    Ok(())
}

/// Rolls all three slots without input and returns the result.
pub async fn autoplay(session: Session, frame: Duration, quiet: bool) -> anyhow::Result<GameResult> {
    let mut table = Table::new(session, quiet);
    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if let Some(result) = table.step() {
            if !quiet {
                println!();
            }
            return Ok(result);
        }
        let state = table.session.state();
        if !state.is_auto_mode && !state.is_complete {
            table.primary();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucky_core::{SeededSource, SessionTiming};

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command(""), Command::Primary);
        assert_eq!(parse_command(" Roll "), Command::Primary);
        assert_eq!(parse_command("hint"), Command::Hint);
        assert_eq!(parse_command("reset"), Command::Reset);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("4"), Command::Pick("4".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_finishes_with_three_distinct_numbers() {
        let timing = SessionTiming {
            auto_commit_delay_ms: 300,
            ..SessionTiming::default()
        };
        let source: Box<dyn NumberSource> = Box::new(SeededSource::new(11));
        let session = GameSession::new(source, timing).unwrap();
        let result = autoplay(session, Duration::from_millis(20), true).await.unwrap();
        let mut numbers = result.numbers;
        numbers.sort_unstable();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(result.total, numbers.iter().sum::<u8>());
    }
}
