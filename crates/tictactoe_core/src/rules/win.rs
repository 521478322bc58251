//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Mark};
use tracing::instrument;

/// Three cell indices that win the game when they hold the same mark.
pub type WinLine = [usize; 3];

/// All winning lines, in scan order: rows, columns, diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first complete line in scan order, with its mark.
#[instrument(level = "trace", skip(board))]
pub fn winning_line(board: &Board) -> Option<(Mark, WinLine)> {
    WIN_LINES
        .iter()
        .find_map(|&line| line_owner(board, line).map(|mark| (mark, line)))
}

/// Checks whether `mark` owns any complete line.
pub fn has_line(board: &Board, mark: Mark) -> bool {
    WIN_LINES
        .iter()
        .any(|&line| line_owner(board, line) == Some(mark))
}

/// The mark filling all three cells of `line`, if any.
fn line_owner(board: &Board, [a, b, c]: WinLine) -> Option<Mark> {
    let mark = board.mark_at(a)?;
    (board.mark_at(b) == Some(mark) && board.mark_at(c) == Some(mark)).then_some(mark)
}
