//! Invariants over [`GameState`].
//!
//! These are checked with `debug_assert!` after every applied move. A
//! violation means the engine reached an impossible state; it is a bug, not
//! a recoverable error.

use crate::rules::{Evaluation, evaluate_board, has_line};
use crate::state::GameState;
use crate::types::Mark;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: at most one mark owns a complete line.
pub struct SingleWinnerInvariant;

impl Invariant<GameState> for SingleWinnerInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        !(has_line(board, Mark::X) && has_line(board, Mark::O))
    }

    fn description() -> &'static str {
        "At most one mark completes a line"
    }
}

/// Invariant: marks alternate, X first.
///
/// While the game runs, X is to move exactly when both marks have been
/// placed equally often. Once it ends, `current` names the mark that made
/// the final move.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Mark::X);
        let o = state.board().count(Mark::O);
        if x != o && x != o + 1 {
            return false;
        }
        let x_moved_last = x == o + 1;
        match (state.is_terminal(), state.current()) {
            (false, Mark::X) => !x_moved_last,
            (false, Mark::O) => x_moved_last,
            (true, Mark::X) => x_moved_last,
            (true, Mark::O) => !x_moved_last,
        }
    }

    fn description() -> &'static str {
        "Turns alternate starting with X"
    }
}

/// Invariant: the stored result matches a fresh evaluation of the board.
pub struct ConsistentOutcomeInvariant;

impl Invariant<GameState> for ConsistentOutcomeInvariant {
    fn holds(state: &GameState) -> bool {
        let stored = Evaluation {
            outcome: state.outcome(),
            win_line: state.win_line(),
        };
        stored == evaluate_board(state.board())
    }

    fn description() -> &'static str {
        "Stored result matches the board"
    }
}

/// All game invariants as a composable set.
pub type GameInvariants = (
    SingleWinnerInvariant,
    AlternatingTurnInvariant,
    ConsistentOutcomeInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_game_holds() {
        assert_eq!(<GameInvariants as InvariantSet<GameState>>::check_all(&GameState::new()), Ok(()));
    }

    #[test]
    fn test_played_game_holds() {
        let mut state = GameState::new();
        for index in [4, 0, 8, 2, 1, 7] {
            state.apply_move(index).unwrap();
            assert!(AlternatingTurnInvariant::holds(&state));
            assert!(ConsistentOutcomeInvariant::holds(&state));
        }
    }

    #[test]
    fn test_won_game_holds() {
        let mut state = GameState::new();
        for index in [0, 3, 1, 4, 2] {
            state.apply_move(index).unwrap();
        }
        assert!(state.is_terminal());
        assert_eq!(<GameInvariants as InvariantSet<GameState>>::check_all(&state), Ok(()));
    }
}
