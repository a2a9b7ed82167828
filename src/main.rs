//! Noughts - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use noughts::{EngineConfig, GameEngine, console, simulate};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play { delay_ms, seed } => run_play(config, delay_ms, seed).await,
        Command::Simulate { games, seed, json } => run_simulate(games, seed, json).await,
    }
}

/// Reads the config file if one was given, defaults otherwise.
fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Run an interactive console game
#[instrument(skip(config))]
async fn run_play(config: EngineConfig, delay_ms: Option<u64>, seed: Option<u64>) -> Result<()> {
    let mut config = config;
    if let Some(delay_ms) = delay_ms {
        config = config.with_opponent_delay_ms(delay_ms);
    }
    if let Some(seed) = seed {
        config = config.with_rng_seed(seed);
    }

    info!(delay_ms = *config.opponent_delay_ms(), "Starting game");
    console::play(GameEngine::new(&config)).await
}

/// Run scripted games and print the tally
#[instrument]
async fn run_simulate(games: usize, seed: u64, json: bool) -> Result<()> {
    let tally = simulate::run_with_seed(games, seed).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        println!("{}", tally);
    }
    Ok(())
}
