//! Terminal tic-tac-toe with an optional scripted CPU opponent.
//!
//! # Architecture
//!
//! - **Core** ([`tictactoe_core`]): board, rules, engine and the CPU move policy
//! - **Session**: owns the live game, issues and resolves CPU tickets
//! - **Scheduler**: one-shot timers for the CPU's thinking delay
//! - **TUI**: ratatui front end driving the session
//!
//! # Example
//!
//! ```
//! use tictactoe::{AppConfig, CpuResolution, Session};
//!
//! let config = AppConfig::from_toml("cpu_enabled = true\nseed = 7").unwrap();
//! let mut session = Session::new(config.carry_over(), config.rng());
//!
//! let ticket = session.human_move(0).unwrap().expect("CPU plays O");
//! assert!(matches!(session.resolve_cpu_move(ticket), CpuResolution::Applied(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod event;
mod scheduler;
mod session;
pub mod tui;

pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use event::AppEvent;
pub use scheduler::{CpuScheduler, DEFAULT_CPU_DELAY};
pub use session::{AbandonReason, CPU_MARK, CpuResolution, CpuTicket, Phase, Session};

pub use tictactoe_core::{
    Board, CarryOver, Cell, Evaluation, FixedSequence, GameRng, GameState, Mark, MoveError,
    MoveRecord, Outcome, PlayerNames, PolicyError, Position, RandomSource, WinLine,
    evaluate_board, policy,
};
