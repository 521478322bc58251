//! Session controller: owns the live game and coordinates the CPU opponent.
//!
//! The session is the only owner of the [`GameState`]. Human input, the CPU
//! toggle, name edits and resets all go through it. When the CPU has to move
//! the session locks input and hands out a [`CpuTicket`]; the ticket comes
//! back after the thinking delay and is resolved against the *current* game.
//! Each reset bumps the generation, so tickets from an earlier game are
//! discarded.

use tictactoe_core::{
    CarryOver, GameRng, GameState, Mark, MoveError, MoveRecord, RandomSource, policy,
};
use tracing::{debug, info, instrument, warn};

/// Mark played by the CPU when it is enabled.
pub const CPU_MARK: Mark = Mark::O;

/// A scheduled CPU move, tied to the game generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct CpuTicket {
    generation: u64,
    mark: Mark,
}

impl CpuTicket {
    /// Generation of the game this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark the CPU is to play.
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// Where the game stands from the interaction layer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phase {
    /// A human may move.
    #[display("awaiting human move")]
    AwaitingHumanMove,
    /// A CPU move is scheduled; input is locked.
    #[display("CPU move in flight")]
    AutomatedMoveInFlight,
    /// The game is over until reset.
    #[display("game over")]
    Terminal,
}

/// Why a CPU ticket was dropped without moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AbandonReason {
    /// The game was reset after the ticket was issued.
    #[display("stale generation")]
    StaleGeneration,
    /// The game already has a result.
    #[display("game over")]
    GameOver,
    /// It is no longer the ticket's mark to move.
    #[display("turn changed")]
    TurnChanged,
    /// The CPU was switched off while the ticket was pending.
    #[display("CPU disabled")]
    CpuDisabled,
    /// The policy found no move or the engine refused it.
    #[display("no legal move")]
    NoMove,
}

/// Outcome of resolving a [`CpuTicket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuResolution {
    /// The CPU's move was applied.
    Applied(MoveRecord),
    /// The ticket was dropped.
    Abandoned(AbandonReason),
}

/// Owns the single live game and the CPU's random source.
#[derive(Debug)]
pub struct Session<R = GameRng> {
    state: GameState,
    generation: u64,
    rng: R,
}

impl<R: RandomSource> Session<R> {
    /// Starts a session with the given configuration and random source.
    #[instrument(skip(rng), fields(cpu_enabled = carry.cpu_enabled))]
    pub fn new(carry: CarryOver, rng: R) -> Self {
        info!("Starting game session");
        Self {
            state: GameState::reset(carry),
            generation: 0,
            rng,
        }
    }

    /// The live game.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Reset counter; increases by one on every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if self.state.is_terminal() {
            Phase::Terminal
        } else if self.state.is_locked() {
            Phase::AutomatedMoveInFlight
        } else {
            Phase::AwaitingHumanMove
        }
    }

    /// Applies a human move at `index`.
    ///
    /// Returns a ticket when the move hands the turn to the CPU.
    ///
    /// # Errors
    ///
    /// Any [`MoveError`] from the engine; the game is left unchanged.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn human_move(&mut self, index: usize) -> Result<Option<CpuTicket>, MoveError> {
        match self.state.apply_move(index) {
            Ok(record) => {
                info!(mark = %record.mark, index, "Human moved");
                Ok(self.schedule_cpu())
            }
            Err(e) => {
                debug!(error = %e, "Human move declined");
                Err(e)
            }
        }
    }

    /// Turns the CPU opponent on or off.
    ///
    /// Turning it on during O's turn of a running game schedules a move at
    /// once.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn set_cpu_enabled(&mut self, enabled: bool) -> Option<CpuTicket> {
        info!("CPU opponent toggled");
        self.state.set_cpu_enabled(enabled);
        if enabled { self.schedule_cpu() } else { None }
    }

    /// Flips the CPU opponent.
    pub fn toggle_cpu(&mut self) -> Option<CpuTicket> {
        self.set_cpu_enabled(!self.state.cpu_enabled())
    }

    /// Whether the name for `mark` may be edited right now.
    ///
    /// Names are fixed once the first mark is placed, and O's name is fixed
    /// while the CPU plays it.
    pub fn name_editable(&self, mark: Mark) -> bool {
        self.state.move_count() == 0 && !(mark == CPU_MARK && self.state.cpu_enabled())
    }

    /// Stores entered text for `mark`. Returns `false` if names are locked.
    pub fn set_name(&mut self, mark: Mark, name: impl Into<String>) -> bool {
        if !self.name_editable(mark) {
            debug!(%mark, "Name edit declined");
            return false;
        }
        self.state.set_name(mark, name);
        true
    }

    /// Replaces the game with a fresh one, keeping CPU flag and names.
    ///
    /// Any outstanding ticket becomes stale.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.state = GameState::reset(self.state.carry_over());
        self.generation += 1;
        info!(new_generation = self.generation, "Game reset");
    }

    /// Resolves a ticket after the CPU's thinking delay.
    ///
    /// The move is applied only if the ticket belongs to the current game, the
    /// game is running, it is the ticket's mark to move and the CPU is still
    /// enabled. The input lock is released whenever the ticket belongs to the
    /// current game.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn resolve_cpu_move(&mut self, ticket: CpuTicket) -> CpuResolution {
        if ticket.generation != self.generation {
            debug!(ticket_generation = ticket.generation, "Discarding stale CPU ticket");
            return CpuResolution::Abandoned(AbandonReason::StaleGeneration);
        }
        self.state.unlock_input();

        let reason = if self.state.is_terminal() {
            Some(AbandonReason::GameOver)
        } else if self.state.current() != ticket.mark {
            Some(AbandonReason::TurnChanged)
        } else if !self.state.cpu_enabled() {
            Some(AbandonReason::CpuDisabled)
        } else {
            None
        };
        if let Some(reason) = reason {
            debug!(%reason, "CPU ticket abandoned");
            return CpuResolution::Abandoned(reason);
        }

        let applied = policy::choose_move(&self.state, &mut self.rng)
            .ok()
            .and_then(|index| self.state.apply_move(index).ok());
        match applied {
            Some(record) => {
                info!(mark = %record.mark, index = record.index, "CPU moved");
                CpuResolution::Applied(record)
            }
            None => {
                warn!("CPU found no move to make");
                CpuResolution::Abandoned(AbandonReason::NoMove)
            }
        }
    }

    /// Locks input and issues a ticket if the CPU is to move.
    fn schedule_cpu(&mut self) -> Option<CpuTicket> {
        let due = !self.state.is_terminal()
            && !self.state.is_locked()
            && self.state.cpu_enabled()
            && self.state.current() == CPU_MARK;
        if !due {
            return None;
        }
        self.state.lock_input();
        let ticket = CpuTicket::new(self.generation, CPU_MARK);
        debug!(?ticket, "CPU move scheduled");
        Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::{FixedSequence, PlayerNames};

    fn session(cpu_enabled: bool) -> Session<FixedSequence> {
        Session::new(
            CarryOver {
                cpu_enabled,
                names: PlayerNames::default(),
            },
            FixedSequence::new([0]),
        )
    }

    #[test]
    fn test_human_move_without_cpu_issues_no_ticket() {
        let mut s = session(false);
        assert_eq!(s.human_move(4), Ok(None));
        assert_eq!(s.phase(), Phase::AwaitingHumanMove);
        assert_eq!(s.state().current(), Mark::O);
    }

    #[test]
    fn test_human_move_with_cpu_locks_until_resolved() {
        let mut s = session(true);
        let ticket = s.human_move(0).unwrap().unwrap();
        assert_eq!(s.phase(), Phase::AutomatedMoveInFlight);
        assert_eq!(s.human_move(1), Err(MoveError::InputLocked));

        match s.resolve_cpu_move(ticket) {
            CpuResolution::Applied(record) => {
                assert_eq!(record.mark, Mark::O);
                assert_eq!(record.index, 4);
            }
            other => panic!("expected applied move, got {other:?}"),
        }
        assert_eq!(s.phase(), Phase::AwaitingHumanMove);
    }

    #[test]
    fn test_winning_human_move_schedules_nothing() {
        let mut s = session(false);
        for index in [0, 3, 1, 4] {
            s.human_move(index).unwrap();
        }
        s.set_cpu_enabled(true);
        // X to move, so enabling the CPU did not schedule anything.
        assert_eq!(s.phase(), Phase::AwaitingHumanMove);
        assert_eq!(s.human_move(2), Ok(None));
        assert_eq!(s.phase(), Phase::Terminal);
    }

    #[test]
    fn test_names_lock_after_first_move() {
        let mut s = session(false);
        assert!(s.set_name(Mark::X, "Ada"));
        s.human_move(4).unwrap();
        assert!(!s.set_name(Mark::X, "Bob"));
        assert_eq!(s.state().label(Mark::X), "Ada");
        s.reset();
        assert!(s.name_editable(Mark::X));
    }

    #[test]
    fn test_o_name_locked_while_cpu_enabled() {
        let s = session(true);
        assert!(s.name_editable(Mark::X));
        assert!(!s.name_editable(Mark::O));
    }
}
