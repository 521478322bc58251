//! Game state and the engine entry points that mutate it.

use crate::error::MoveError;
use crate::invariants::{GameInvariants, InvariantSet};
use crate::rules::{Evaluation, WinLine, evaluate_board};
use crate::types::{Board, Mark, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Label shown for O while the CPU plays it.
pub const CPU_LABEL: &str = "CPU";

/// Names as entered by the players, keyed by mark.
///
/// The raw text is kept; [`GameState::label`] applies the fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerNames {
    x: String,
    o: String,
}

impl PlayerNames {
    /// Creates a name mapping from entered text.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// Entered text for `mark`.
    pub fn get(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }

    /// Replaces the entered text for `mark`.
    pub fn set(&mut self, mark: Mark, name: impl Into<String>) {
        match mark {
            Mark::X => self.x = name.into(),
            Mark::O => self.o = name.into(),
        }
    }
}

/// Configuration carried from one game into the next on reset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarryOver {
    /// Whether the CPU plays O.
    pub cpu_enabled: bool,
    /// Entered player names.
    pub names: PlayerNames,
}

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// Mark that was placed.
    pub mark: Mark,
    /// Cell it was placed in.
    pub index: usize,
    /// Board evaluation after the move.
    pub evaluation: Evaluation,
}

/// Complete state of one game.
///
/// Created by [`GameState::reset`] and replaced wholesale on the next reset.
/// All mutation goes through the methods below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current: Mark,
    outcome: Option<Outcome>,
    win_line: Option<WinLine>,
    cpu_enabled: bool,
    locked: bool,
    names: PlayerNames,
}

impl GameState {
    /// Creates a fresh game with default configuration (CPU off, no names).
    pub fn new() -> Self {
        Self::reset(CarryOver::default())
    }

    /// Creates a fresh game, keeping the configuration in `carry`.
    ///
    /// The board is empty, X is to move, there is no result and the input
    /// lock is clear.
    #[instrument(skip(carry), fields(cpu_enabled = carry.cpu_enabled))]
    pub fn reset(carry: CarryOver) -> Self {
        debug!("Creating fresh game state");
        Self {
            board: Board::new(),
            current: Mark::X,
            outcome: None,
            win_line: None,
            cpu_enabled: carry.cpu_enabled,
            locked: false,
            names: carry.names,
        }
    }

    /// Configuration to hand to the next [`GameState::reset`].
    pub fn carry_over(&self) -> CarryOver {
        CarryOver {
            cpu_enabled: self.cpu_enabled,
            names: self.names.clone(),
        }
    }

    /// Places the current mark at `index`.
    ///
    /// On success the board, result and win line are updated, and the turn
    /// passes to the other mark unless the move ended the game. On error the
    /// state is unchanged.
    ///
    /// # Errors
    ///
    /// - [`MoveError::InputLocked`] while a CPU move is pending
    /// - [`MoveError::GameOver`] once the game has a result
    /// - [`MoveError::OutOfBounds`] for an index above 8
    /// - [`MoveError::Occupied`] if the cell already holds a mark
    #[instrument(skip(self), fields(mark = %self.current))]
    pub fn apply_move(&mut self, index: usize) -> Result<MoveRecord, MoveError> {
        if self.locked {
            return Err(MoveError::InputLocked);
        }
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if index >= Board::SIZE {
            return Err(MoveError::OutOfBounds(index));
        }
        if !self.board.is_empty(index) {
            return Err(MoveError::Occupied(index));
        }

        let mark = self.current;
        self.board.place(index, mark);

        let evaluation = evaluate_board(&self.board);
        self.outcome = evaluation.outcome;
        self.win_line = evaluation.win_line;
        if !evaluation.is_terminal() {
            self.current = mark.opponent();
        }

        debug_assert_eq!(
            <GameInvariants as InvariantSet<GameState>>::check_all(self),
            Ok(()),
            "invariant violated after move"
        );
        debug!(outcome = ?self.outcome, "Move applied");

        Ok(MoveRecord {
            mark,
            index,
            evaluation,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move next (or the mark that made the final move once over).
    pub fn current(&self) -> Mark {
        self.current
    }

    /// Terminal result, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Completed line, set only for a line win.
    pub fn win_line(&self) -> Option<WinLine> {
        self.win_line
    }

    /// True once the game has a result.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether the CPU plays O.
    pub fn cpu_enabled(&self) -> bool {
        self.cpu_enabled
    }

    /// Whether move input is locked for a pending CPU move.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Entered player names.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// Number of marks on the board.
    pub fn move_count(&self) -> usize {
        Board::SIZE - self.board.empty_indices().count()
    }

    /// Turns the CPU opponent on or off.
    pub fn set_cpu_enabled(&mut self, enabled: bool) {
        self.cpu_enabled = enabled;
    }

    /// Stores entered text for `mark`.
    pub fn set_name(&mut self, mark: Mark, name: impl Into<String>) {
        self.names.set(mark, name);
    }

    /// Locks move input while a CPU move is pending.
    pub fn lock_input(&mut self) {
        self.locked = true;
    }

    /// Releases the input lock.
    pub fn unlock_input(&mut self) {
        self.locked = false;
    }

    /// Display label for `mark`.
    ///
    /// O is always `"CPU"` while the CPU is enabled. Otherwise the trimmed
    /// entered name, falling back to `"Player X"` / `"Player O"` when blank.
    pub fn label(&self, mark: Mark) -> String {
        if mark == Mark::O && self.cpu_enabled {
            return CPU_LABEL.to_string();
        }
        match self.names.get(mark).trim() {
            "" => format!("Player {mark}"),
            name => name.to_string(),
        }
    }

    /// Human-readable status line.
    pub fn status_text(&self) -> String {
        match self.outcome {
            Some(Outcome::Draw) => "It's a draw.".to_string(),
            Some(Outcome::Winner(mark)) => format!("{} wins!", self.label(mark)),
            None => format!("{}'s turn", self.label(self.current)),
        }
    }

    /// Whether a move on `index` would currently be refused.
    pub fn is_cell_disabled(&self, index: usize) -> bool {
        self.locked || self.is_terminal() || !self.board.is_empty(index)
    }

    /// Whether `index` belongs to the winning line.
    pub fn is_on_win_line(&self, index: usize) -> bool {
        self.win_line.is_some_and(|line| line.contains(&index))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: &mut GameState, moves: &[usize]) {
        for &index in moves {
            state.apply_move(index).unwrap();
        }
    }

    #[test]
    fn test_turn_alternates_until_terminal() {
        let mut state = GameState::new();
        assert_eq!(state.current(), Mark::X);
        state.apply_move(4).unwrap();
        assert_eq!(state.current(), Mark::O);
        state.apply_move(0).unwrap();
        assert_eq!(state.current(), Mark::X);
    }

    #[test]
    fn test_winning_move_keeps_turn() {
        let mut state = GameState::new();
        play(&mut state, &[0, 3, 1, 4]);
        let record = state.apply_move(2).unwrap();
        assert_eq!(record.mark, Mark::X);
        assert_eq!(record.evaluation.winner(), Some(Mark::X));
        assert_eq!(state.current(), Mark::X);
        assert_eq!(state.win_line(), Some([0, 1, 2]));
        assert_eq!(state.status_text(), "Player X wins!");
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut state = GameState::new();
        state.apply_move(4).unwrap();
        let before = state.clone();

        assert_eq!(state.apply_move(4), Err(MoveError::Occupied(4)));
        assert_eq!(state.apply_move(9), Err(MoveError::OutOfBounds(9)));
        state.lock_input();
        assert_eq!(state.apply_move(0), Err(MoveError::InputLocked));
        state.unlock_input();
        assert_eq!(state, before);
    }

    #[test]
    fn test_terminal_game_refuses_moves() {
        let mut state = GameState::new();
        play(&mut state, &[0, 3, 1, 4, 2]);
        assert_eq!(state.apply_move(8), Err(MoveError::GameOver));
        assert!(state.is_cell_disabled(8));
    }

    #[test]
    fn test_labels_fall_back_and_cpu_overrides() {
        let mut state = GameState::new();
        assert_eq!(state.label(Mark::X), "Player X");
        state.set_name(Mark::X, "  Ada  ");
        state.set_name(Mark::O, "Grace");
        assert_eq!(state.label(Mark::X), "Ada");
        assert_eq!(state.label(Mark::O), "Grace");
        state.set_cpu_enabled(true);
        assert_eq!(state.label(Mark::O), CPU_LABEL);
        state.set_name(Mark::X, "   ");
        assert_eq!(state.status_text(), "Player X's turn");
    }

    #[test]
    fn test_reset_carries_config_only() {
        let mut state = GameState::new();
        state.set_cpu_enabled(true);
        state.set_name(Mark::X, "Ada");
        play(&mut state, &[0, 4]);
        state.lock_input();

        let fresh = GameState::reset(state.carry_over());
        assert_eq!(fresh.board(), &Board::new());
        assert_eq!(fresh.current(), Mark::X);
        assert_eq!(fresh.outcome(), None);
        assert!(!fresh.is_locked());
        assert!(fresh.cpu_enabled());
        assert_eq!(fresh.names().get(Mark::X), "Ada");
    }

    #[test]
    fn test_draw_status() {
        let mut state = GameState::new();
        // X O X / X O O / O X X
        play(&mut state, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(state.outcome(), Some(Outcome::Draw));
        assert_eq!(state.win_line(), None);
        assert_eq!(state.status_text(), "It's a draw.");
    }
}
