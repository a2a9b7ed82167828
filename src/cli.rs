//! Command-line interface for noughts.

use clap::{Parser, Subcommand};

/// Noughts - tic-tac-toe against a scripted opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play tic-tac-toe against a scripted opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to an engine config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Opponent thinking delay in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for the opponent's random moves (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play scripted games and report the outcome tally
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Seed for both sides' random moves
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },
}
