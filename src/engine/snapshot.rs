//! Observable engine state.

use noughts_core::{Board, IllegalMove, Verdict};
use serde::Serialize;

/// Where the game is in the human-then-opponent cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TurnPhase {
    /// Waiting for the human to pick a cell.
    AwaitingHuman,
    /// The opponent's reply is scheduled; human input is locked.
    OpponentThinking,
    /// A terminal outcome was reached; only reset is accepted.
    GameOver,
}

/// Immutable view of the engine, published after every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    /// Marks on the board.
    pub board: Board,
    /// Current phase.
    pub phase: TurnPhase,
    /// True unless the human may move right now.
    pub input_locked: bool,
    /// Terminal outcome waiting for the collaborator to show and reset.
    pub pending_outcome: Option<Verdict>,
}

impl EngineSnapshot {
    pub(crate) fn new(board: Board, phase: TurnPhase, pending_outcome: Option<Verdict>) -> Self {
        Self {
            board,
            phase,
            input_locked: phase != TurnPhase::AwaitingHuman,
            pending_outcome,
        }
    }

    /// Fresh game, human to move.
    pub fn initial() -> Self {
        Self::new(Board::new(), TurnPhase::AwaitingHuman, None)
    }
}

/// What happened to a human move intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The mark was placed.
    Accepted,
    /// The intent was dropped; the engine state did not change.
    Ignored(IgnoreReason),
}

/// Why a human move intent was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IgnoreReason {
    /// The opponent's reply is still pending.
    #[display("opponent is thinking")]
    OpponentThinking,
    /// The game has ended and awaits reset.
    #[display("game is over")]
    GameOver,
    /// The board refused the placement.
    #[display("{}", _0)]
    Illegal(IllegalMove),
}
