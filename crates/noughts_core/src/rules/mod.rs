//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the turn sequencer and the opponent share one evaluator.

pub mod draw;
pub mod win;

pub use draw::{is_draw, outcome};
pub use win::{has_won, WIN_PATTERNS};
