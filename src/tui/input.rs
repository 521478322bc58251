//! Keyboard helpers: cursor movement and digit shortcuts.

use crossterm::event::KeyCode;
use tictactoe_core::Position;

/// Moves the cursor one cell in the arrow's direction, stopping at edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).and_then(|r| Position::at(r, col)),
        KeyCode::Down => Position::at(row + 1, col),
        KeyCode::Left => col.checked_sub(1).and_then(|c| Position::at(row, c)),
        KeyCode::Right => Position::at(row, col + 1),
        _ => None,
    };
    target.unwrap_or(cursor)
}

/// Maps keys `1`-`9` to cell indices 0-8.
pub fn digit_index(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        d @ 1..=9 => Some(d as usize - 1),
        _ => None,
    }
}
