//! Pure tic-tac-toe game logic.
//!
//! - [`GameState`] owns the board, turn, result, CPU flag, input lock and
//!   player names, and is the only place moves are applied.
//! - [`evaluate_board`] scans the eight fixed lines for a result.
//! - [`policy`] picks moves for the scripted CPU opponent.
//!
//! ```
//! use tictactoe_core::{FixedSequence, GameState, Mark, policy};
//!
//! let mut state = GameState::new();
//! state.apply_move(0)?;
//! state.apply_move(4)?;
//! state.apply_move(1)?;
//!
//! // O must block the top row.
//! let mut rng = FixedSequence::new([0]);
//! assert_eq!(policy::select_move(state.board(), Mark::O, &mut rng), Some(2));
//! # Ok::<(), tictactoe_core::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod invariants;
pub mod policy;
mod position;
pub mod rules;
mod state;
mod types;

pub use error::{MoveError, PolicyError};
pub use policy::{FixedSequence, GameRng, RandomSource, Tier};
pub use position::{CENTER, CORNERS, Position, SIDES};
pub use rules::{Evaluation, WIN_LINES, WinLine, evaluate_board};
pub use state::{CPU_LABEL, CarryOver, GameState, MoveRecord, PlayerNames};
pub use types::{Board, Cell, Mark, Outcome};
