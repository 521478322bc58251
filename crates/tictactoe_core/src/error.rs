//! Errors raised by the engine and the move policy.
//!
//! Both are absorbed by the caller: a rejected move leaves the state
//! untouched and nothing is shown to the player beyond that.

use derive_more::{Display, Error};

/// Why a move was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// A CPU move is pending; input is locked until it lands.
    #[display("Input is locked while the CPU is moving")]
    InputLocked,

    /// The game already has a result.
    #[display("Game is already over")]
    GameOver,

    /// Index outside 0-8.
    #[display("Cell {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(#[error(not(source))] usize),
}

/// The policy was asked to move where no move exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PolicyError {
    /// Board is full or the game is over.
    #[display("Move policy invoked on a finished game")]
    InvalidInvocation,
}
