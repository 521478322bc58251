//! Application state and key handling.

use super::input::{digit_index, move_cursor};
use crate::session::{CpuResolution, CpuTicket, Session};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictactoe_core::{GameRng, Mark, Position, RandomSource};
use tracing::debug;

/// What keystrokes currently drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Keys move the cursor and play.
    Play,
    /// Keys edit the name for `mark`.
    EditName {
        /// Whose name is being edited.
        mark: Mark,
        /// Text typed so far.
        buffer: String,
    },
}

/// Main application state.
#[derive(Debug)]
pub struct App<R = GameRng> {
    session: Session<R>,
    cursor: Position,
    mode: Mode,
    should_quit: bool,
}

impl<R: RandomSource> App<R> {
    /// Creates the app around a session.
    pub fn new(session: Session<R>) -> Self {
        Self {
            session,
            cursor: Position::Center,
            mode: Mode::Play,
            should_quit: false,
        }
    }

    /// The game session.
    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Current input mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press. Returns a ticket if a CPU move must be scheduled.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<CpuTicket> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }
        match self.mode {
            Mode::Play => self.handle_play_key(key.code),
            Mode::EditName { .. } => {
                self.handle_edit_key(key.code);
                None
            }
        }
    }

    /// Handles a CPU ticket whose delay elapsed.
    pub fn handle_cpu_ready(&mut self, ticket: CpuTicket) {
        if let CpuResolution::Applied(record) = self.session.resolve_cpu_move(ticket)
            && let Some(pos) = Position::from_index(record.index)
        {
            debug!(position = %pos, "CPU move shown");
        }
    }

    fn handle_play_key(&mut self, code: KeyCode) -> Option<CpuTicket> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, code);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor.to_index()),
            KeyCode::Char(c) if digit_index(c).is_some() => {
                let index = digit_index(c)?;
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                self.place(index)
            }
            KeyCode::Char('c') => self.session.toggle_cpu(),
            KeyCode::Char('r') => {
                self.session.reset();
                None
            }
            KeyCode::Char('x') => {
                self.start_edit(Mark::X);
                None
            }
            KeyCode::Char('o') => {
                self.start_edit(Mark::O);
                None
            }
            _ => None,
        }
    }

    fn place(&mut self, index: usize) -> Option<CpuTicket> {
        // Declined moves are logged by the session; the board just stays put.
        self.session.human_move(index).ok().flatten()
    }

    fn start_edit(&mut self, mark: Mark) {
        if !self.session.name_editable(mark) {
            debug!(%mark, "Name is not editable now");
            return;
        }
        let buffer = self.session.state().names().get(mark).to_string();
        self.mode = Mode::EditName { mark, buffer };
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        let Mode::EditName { mark, buffer } = &mut self.mode else {
            return;
        };
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.mode = Mode::Play;
                return;
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => return,
        }
        let (mark, name) = (*mark, buffer.clone());
        self.session.set_name(mark, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;
    use tictactoe_core::{CarryOver, FixedSequence, PlayerNames};

    fn app(cpu_enabled: bool) -> App<FixedSequence> {
        App::new(Session::new(
            CarryOver {
                cpu_enabled,
                names: PlayerNames::default(),
            },
            FixedSequence::new([0]),
        ))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digit_places_mark_and_moves_cursor() {
        let mut app = app(false);
        assert_eq!(app.handle_key(key(KeyCode::Char('1'))), None);
        assert_eq!(app.session().state().board().mark_at(0), Some(Mark::X));
        assert_eq!(app.cursor(), Position::TopLeft);
    }

    #[test]
    fn test_enter_places_at_cursor_and_schedules_cpu() {
        let mut app = app(true);
        app.handle_key(key(KeyCode::Up));
        let ticket = app.handle_key(key(KeyCode::Enter));
        assert!(ticket.is_some());
        assert_eq!(app.session().state().board().mark_at(1), Some(Mark::X));
        assert_eq!(app.session().phase(), Phase::AutomatedMoveInFlight);
    }

    #[test]
    fn test_name_editing_updates_label_live() {
        let mut app = app(false);
        app.handle_key(key(KeyCode::Char('x')));
        for c in "Adaa".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.session().state().label(Mark::X), "Ada");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode(), &Mode::Play);
        assert_eq!(app.session().state().status_text(), "Ada's turn");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(false);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_toggle_key_flips_cpu() {
        let mut app = app(false);
        assert_eq!(app.handle_key(key(KeyCode::Char('c'))), None);
        assert!(app.session().state().cpu_enabled());
    }
}
