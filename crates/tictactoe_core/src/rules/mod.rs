//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here knows about turns, names
//! or the input lock; those live on [`GameState`](crate::GameState).

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, WinLine, has_line, winning_line};

use crate::types::{Board, Mark, Outcome};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of scanning a board for a terminal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    /// Terminal result, `None` while the game is in progress.
    pub outcome: Option<Outcome>,
    /// Completed line, set only for a line win.
    pub win_line: Option<WinLine>,
}

impl Evaluation {
    /// Game still in progress.
    pub const IN_PROGRESS: Self = Self {
        outcome: None,
        win_line: None,
    };

    /// True once the game has a result.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// The winning mark, if the game was won.
    pub fn winner(&self) -> Option<Mark> {
        self.outcome.and_then(|o| o.winner())
    }
}

/// Evaluates a board.
///
/// Returns the first complete line in [`WIN_LINES`] order with its mark, or a
/// draw when all cells are occupied without a line, or in-progress.
#[instrument(level = "trace", skip(board))]
pub fn evaluate_board(board: &Board) -> Evaluation {
    if let Some((mark, line)) = winning_line(board) {
        debug_assert!(
            !has_line(board, mark.opponent()),
            "both marks complete a line on {board:?}"
        );
        return Evaluation {
            outcome: Some(Outcome::Winner(mark)),
            win_line: Some(line),
        };
    }

    if is_full(board) {
        return Evaluation {
            outcome: Some(Outcome::Draw),
            win_line: None,
        };
    }

    Evaluation::IN_PROGRESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::{O, X};

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate_board(&Board::new()), Evaluation::IN_PROGRESS);
    }

    #[test]
    fn test_first_line_in_scan_order_wins() {
        // X O X / O X O / X _ _ : only [2,4,6] is complete
        let board = Board::from_marks([
            Some(X),
            Some(O),
            Some(X),
            Some(O),
            Some(X),
            Some(O),
            Some(X),
            None,
            None,
        ]);
        let eval = evaluate_board(&board);
        assert_eq!(eval.outcome, Some(Outcome::Winner(X)));
        assert_eq!(eval.win_line, Some([2, 4, 6]));
    }

    #[test]
    fn test_double_line_reports_row_before_column() {
        // X X X / X O O / X O O : row [0,1,2] and column [0,3,6]
        let board = Board::from_marks([
            Some(X),
            Some(X),
            Some(X),
            Some(X),
            Some(O),
            Some(O),
            Some(X),
            Some(O),
            Some(O),
        ]);
        assert_eq!(evaluate_board(&board).win_line, Some([0, 1, 2]));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = Board::from_marks([
            Some(X),
            Some(O),
            Some(X),
            Some(X),
            Some(O),
            Some(O),
            Some(O),
            Some(X),
            Some(X),
        ]);
        let eval = evaluate_board(&board);
        assert_eq!(eval.outcome, Some(Outcome::Draw));
        assert_eq!(eval.win_line, None);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        // X O X / O X O / O X X : full, X wins on [0,4,8]
        let board = Board::from_marks([
            Some(X),
            Some(O),
            Some(X),
            Some(O),
            Some(X),
            Some(O),
            Some(O),
            Some(X),
            Some(X),
        ]);
        let eval = evaluate_board(&board);
        assert_eq!(eval.outcome, Some(Outcome::Winner(X)));
        assert_eq!(eval.win_line, Some([0, 4, 8]));
    }
}
