//! Terminal UI: the interaction layer around the game session.

mod app;
mod input;
mod ui;

pub use app::{App, Mode};

use crate::config::AppConfig;
use crate::event::AppEvent;
use crate::scheduler::CpuScheduler;
use crate::session::Session;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tictactoe_core::RandomSource;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Runs the game until the user quits.
#[instrument(skip_all)]
pub async fn run(config: &AppConfig) -> Result<()> {
    info!("Starting tic-tac-toe TUI");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    spawn_input_reader(event_tx.clone());
    let scheduler = CpuScheduler::new(config.cpu_delay(), event_tx);

    let mut app = App::new(Session::new(config.carry_over(), config.rng()));
    let res = event_loop(&mut terminal, &mut app, &scheduler, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draws, waits for the next event, applies it; repeats until quit.
async fn event_loop<B, R>(
    terminal: &mut Terminal<B>,
    app: &mut App<R>,
    scheduler: &CpuScheduler,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()>
where
    B: ratatui::backend::Backend,
    B::Error: Send + Sync + 'static,
    R: RandomSource,
{
    loop {
        terminal.draw(|f| ui::draw(f, &*app))?;

        let Some(event) = event_rx.recv().await else {
            warn!("Event channel closed");
            return Ok(());
        };
        match event {
            AppEvent::Key(key) => {
                if let Some(ticket) = app.handle_key(key) {
                    scheduler.schedule(ticket);
                }
            }
            AppEvent::CpuReady(ticket) => app.handle_cpu_ready(ticket),
            AppEvent::Resize => {}
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }
    }
}

/// Reads terminal events on a dedicated thread and forwards them.
///
/// `crossterm::event::read` blocks, so it stays off the runtime thread. The
/// thread exits when the event loop drops its receiver.
fn spawn_input_reader(event_tx: mpsc::UnboundedSender<AppEvent>) {
    std::thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    event_tx.send(AppEvent::Key(key))
                }
                Ok(Event::Resize(..)) => event_tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    warn!(error = %e, "Failed to read terminal event");
                    return;
                }
            };
            if forwarded.is_err() {
                debug!("Event loop gone; input reader exiting");
                return;
            }
        }
    });
}
