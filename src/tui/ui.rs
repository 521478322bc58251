//! Stateless UI rendering for tic-tac-toe.

use super::app::{App, Mode};
use crate::session::Phase;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_core::{Cell, GameState, Mark, Position, RandomSource};

/// Renders the whole screen.
pub fn draw<R: RandomSource>(frame: &mut Frame, app: &App<R>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(4), // Players + help
        ])
        .split(area);

    let title = Paragraph::new("Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let state = app.session().state();
    draw_board(frame, chunks[1], state, app.cursor());

    let status = match app.session().phase() {
        Phase::AutomatedMoveInFlight => format!("{} (CPU is thinking...)", state.status_text()),
        _ => state.status_text(),
    };
    let status = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    draw_footer(frame, chunks[3], app);
}

fn draw_board(frame: &mut Frame, area: Rect, state: &GameState, cursor: Position) {
    let board_area = center_rect(area, 41, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], state, cursor, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, state: &GameState, cursor: Position, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(13),
            Constraint::Length(1),
            Constraint::Length(13),
            Constraint::Length(1),
            Constraint::Length(13),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::at(row, col) {
            draw_cell(frame, cols[col * 2], state, cursor, pos);
        }
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, state: &GameState, cursor: Position, pos: Position) {
    let index = pos.to_index();
    let cell = state.board().get(index).unwrap_or_default();

    let (symbol, mut style) = match cell {
        Cell::Empty if state.is_cell_disabled(index) => ("   ".to_string(), Style::default()),
        Cell::Empty => (format!(" {} ", index + 1), Style::default().fg(Color::DarkGray)),
        Cell::Occupied(Mark::X) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Cell::Occupied(Mark::O) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    if state.is_on_win_line(index) {
        style = style.bg(Color::Green).fg(Color::Black);
    }
    if pos == cursor && !state.is_terminal() {
        style = style.add_modifier(Modifier::REVERSED);
    }

    // Vertically center the symbol in the three-line cell.
    let lines = vec![Line::from(""), Line::from(Span::styled(symbol, style))];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_footer<R: RandomSource>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let session = app.session();
    let state = session.state();

    let cpu = if state.cpu_enabled() { "on" } else { "off" };
    let players = Line::from(vec![
        Span::styled("X: ", Style::default().fg(Color::Blue)),
        Span::raw(state.label(Mark::X)),
        Span::raw("   "),
        Span::styled("O: ", Style::default().fg(Color::Red)),
        Span::raw(state.label(Mark::O)),
        Span::raw(format!("   CPU: {cpu}")),
    ]);

    let help = match app.mode() {
        Mode::EditName { mark, buffer } => Line::from(Span::styled(
            format!("Name for {mark}: {buffer}_   (Enter to finish)"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Mode::Play => {
            let mut keys = String::from("arrows/1-9 move  Enter place  c CPU  r reset");
            if session.name_editable(Mark::X) {
                keys.push_str("  x name X");
            }
            if session.name_editable(Mark::O) {
                keys.push_str("  o name O");
            }
            keys.push_str("  q quit");
            Line::from(Span::styled(keys, Style::default().fg(Color::DarkGray)))
        }
    };

    let footer = Paragraph::new(vec![players, help])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use ratatui::{Terminal, backend::TestBackend};
    use tictactoe_core::{CarryOver, FixedSequence, PlayerNames};

    fn render(app: &App<FixedSequence>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_status_and_labels() {
        let app = App::new(Session::new(
            CarryOver {
                cpu_enabled: true,
                names: PlayerNames::new("Ada", ""),
            },
            FixedSequence::new([0]),
        ));
        let screen = render(&app);
        assert!(screen.contains("Ada's turn"));
        assert!(screen.contains("O: CPU"));
        assert!(screen.contains("CPU: on"));
    }
}
