//! Events delivered to the UI event loop.

use crate::session::CpuTicket;
use crossterm::event::KeyEvent;

/// Everything the event loop reacts to arrives as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key press from the terminal.
    Key(KeyEvent),
    /// The terminal was resized; redraw.
    Resize,
    /// A CPU move's thinking delay has elapsed.
    CpuReady(CpuTicket),
}
