//! Tictac-Minimax: noughts and crosses against a minimax engine.
//!
//! ## Usage
//!
//! - `tictac-minimax` - Play interactively (same as `play`)
//! - `tictac-minimax play` - Interactive text front-end; the engine replies at once
//! - `tictac-minimax protocol` - Raw command protocol for driving the engine from a GUI
//! - `tictac-minimax demo` - Self-play and random-opponent matches

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictac_minimax::board::Player;
use tictac_minimax::controller::MatchConfig;
use tictac_minimax::playout::{Tally, random_playout, self_play};
use tictac_minimax::protocol::Session;

/// Tictac-Minimax: noughts and crosses against a perfect opponent
#[derive(Parser)]
#[command(name = "tictac-minimax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Side played by the engine (A moves first)
    #[arg(long, value_enum, default_value_t = Side::B, global = true)]
    engine_side: Side,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine on the terminal
    Play,
    /// Start the text command protocol without automatic engine replies
    Protocol,
    /// Run engine self-play and matches against a random opponent
    Demo {
        /// Number of random-opponent matches
        #[arg(long, default_value_t = 100)]
        games: usize,
        /// Seed for the random opponent
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Side {
    A,
    B,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::A => Player::A,
            Side::B => Player::B,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = MatchConfig {
        engine_side: cli.engine_side.into(),
    };

    match cli.command {
        Some(Commands::Protocol) => Session::new(config, false).run(),
        Some(Commands::Demo { games, seed }) => run_demo(config, games, seed),
        Some(Commands::Play) | None => {
            println!("Tictac-Minimax: you play {}", config.engine_side.opponent().mark());
            println!("Commands: play <row> <col>, showboard, reset, quit\n");
            Session::new(config, true).run()
        }
    }
}

fn run_demo(config: MatchConfig, games: usize, seed: u64) -> anyhow::Result<()> {
    println!("Tictac-Minimax: Minimax Engine Demo\n");

    println!("=== Self-play ===");
    let outcome = self_play(config).context("self-play failed")?;
    println!("Result: {outcome:?}\n");

    println!("=== {games} games against a random opponent (seed {seed}) ===");
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut tally = Tally::default();
    for _ in 0..games {
        let outcome = random_playout(config, &mut rng).context("random playout failed")?;
        tally.record(outcome, config.engine_side);
    }
    info!(?tally, "demo finished");
    println!(
        "Engine wins: {}  losses: {}  draws: {}",
        tally.engine_wins, tally.engine_losses, tally.draws
    );
    Ok(())
}
