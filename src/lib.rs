//! Noughts - tic-tac-toe against a scripted opponent
//!
//! The pure rules live in [`noughts_core`]; this crate adds the turn
//! sequencer that paces the opponent, plus the console front end.
//!
//! # Architecture
//!
//! - **Engine**: [`GameEngine`] accepts human moves and resets, schedules
//!   the opponent's delayed reply and publishes [`EngineSnapshot`]s
//! - **Config**: [`EngineConfig`] loaded from TOML
//! - **Console**: a line-based collaborator that renders snapshots
//! - **Simulation**: scripted games for quick statistics
//!
//! # Example
//!
//! ```no_run
//! use noughts::{EngineConfig, GameEngine, Submission};
//!
//! # async fn example() {
//! let engine = GameEngine::new(&EngineConfig::default());
//! assert_eq!(engine.submit_human_move(4), Submission::Accepted);
//!
//! let snapshot = engine.settled().await;
//! assert!(!snapshot.input_locked);
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;

pub mod console;
pub mod simulate;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};

// Crate-level exports - Turn sequencer
pub use engine::{EngineSnapshot, GameEngine, IgnoreReason, Submission, TurnPhase};

// Crate-level exports - Game types
pub use noughts_core::{Board, Cell, HeuristicStrategy, IllegalMove, Move, OpponentStrategy, Outcome, Player, Verdict};
