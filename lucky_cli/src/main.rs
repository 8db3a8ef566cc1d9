use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lucky_core::{
    classify, GameSession, NumberSource, SeededSource, SessionTiming, TimestampHashSource,
};
use lucky_shared::ResultModal;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod background;
mod export;
mod play;
mod render;

#[derive(Parser)]
#[command(name = "lucky-dice", about = "Pick three lucky numbers from 1-6 and see how they score")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Seed for reproducible rolls; without it rolls hash the current time
    #[arg(long, global = true, env = "LUCKY_SEED")]
    seed: Option<u64>,
    /// Animation frame interval in milliseconds
    #[arg(long, global = true, default_value_t = 40)]
    frame_ms: u64,
    /// Length of an automatic roll in milliseconds
    #[arg(long, global = true, default_value_t = 5_000)]
    roll_ms: u64,
    /// Delay before the result after the third manual pick, in milliseconds
    #[arg(long, global = true, default_value_t = 2_000)]
    result_delay_ms: u64,
    /// Optional text file printed as the background banner
    #[arg(long, global = true, env = "LUCKY_BACKGROUND")]
    background: Option<PathBuf>,
    /// Log filter, e.g. "info" or "lucky_core=debug"
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    log: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (default)
    Play,
    /// Roll all three numbers automatically and print the result
    Auto {
        #[arg(long)]
        json: bool,
    },
    /// Score three numbers without playing
    Classify {
        a: u8,
        b: u8,
        c: u8,
        #[arg(long)]
        json: bool,
    },
    /// Export the score of every ordered pick to a CSV file
    ExportCsv { path: PathBuf },
}

impl Cli {
    fn timing(&self) -> SessionTiming {
        SessionTiming {
            result_delay_ms: self.result_delay_ms,
            auto_commit_delay_ms: self.roll_ms,
            ..SessionTiming::default()
        }
    }

    fn session(&self) -> anyhow::Result<play::Session> {
        let source: Box<dyn NumberSource> = match self.seed {
            Some(seed) => Box::new(SeededSource::new(seed)),
            None => Box::new(TimestampHashSource),
        };
        GameSession::new(source, self.timing()).context("invalid timing options")
    }
}

fn print_result(modal: &ResultModal, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(modal)?);
    } else {
        println!("{}", render::modal(modal));
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let frame = Duration::from_millis(cli.frame_ms.max(1));
    match &cli.command {
        None | Some(Commands::Play) => {
            let scenery = background::load(cli.background.as_deref());
            info!(backdrop = ?scenery.backdrop, "starting interactive game");
            play::play(cli.session()?, frame, scenery.banner).await?;
        }
        Some(Commands::Auto { json }) => {
            let result = play::autoplay(cli.session()?, frame, *json).await?;
            print_result(&ResultModal::from(&result), *json)?;
        }
        Some(Commands::Classify { a, b, c, json }) => {
            let result = classify([*a, *b, *c])?;
            print_result(&ResultModal::from(&result), *json)?;
        }
        Some(Commands::ExportCsv { path }) => {
            let rows = export::write_csv(path)?;
            println!("Exported {} rows to {}", rows, path.display());
        }
    }

    Ok(())
}
