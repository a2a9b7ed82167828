//! Pure tic-tac-toe logic for a human against a scripted opponent.
//!
//! - [`Board`] holds up to nine [`Move`]s, one per [`Cell`].
//! - [`rules`] decides wins, draws and the overall [`Outcome`].
//! - [`strategy`] picks the opponent's reply.
//!
//! Nothing here blocks or performs I/O; turn sequencing lives in the
//! `noughts` crate.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cell;
mod error;
mod types;

pub mod rules;
pub mod strategy;

pub use cell::{Cell, CellSet};
pub use error::IllegalMove;
pub use rules::{has_won, is_draw, outcome, WIN_PATTERNS};
pub use strategy::{HeuristicStrategy, OpponentStrategy};
pub use types::{Board, Move, Outcome, Player, Verdict};
