//! One-shot timers for the CPU's thinking delay.

use crate::event::AppEvent;
use crate::session::CpuTicket;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Default delay before the CPU's move lands.
pub const DEFAULT_CPU_DELAY: Duration = Duration::from_millis(250);

/// Posts CPU tickets back to the event loop after a fixed delay.
///
/// Timers are never cancelled. A ticket that outlives its game is discarded
/// when the session resolves it.
#[derive(Debug, Clone)]
pub struct CpuScheduler {
    delay: Duration,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl CpuScheduler {
    /// Creates a scheduler that delivers on `event_tx`.
    pub fn new(delay: Duration, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { delay, event_tx }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts the timer for `ticket`.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&self, ticket: CpuTicket) -> JoinHandle<()> {
        let delay = self.delay;
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            if event_tx.send(AppEvent::CpuReady(ticket)).is_err() {
                debug!(?ticket, "Event loop closed before CPU ticket was delivered");
            }
        })
    }
}
