//! Move policy for the scripted CPU opponent.
//!
//! A fixed priority cascade: win now, block, take the center, take a random
//! corner, take a random side. Only the last two tiers use randomness, and
//! it comes from an injected [`RandomSource`].

use crate::error::PolicyError;
use crate::position::{CENTER, CORNERS, SIDES};
use crate::rules::has_line;
use crate::state::GameState;
use crate::types::{Board, Mark};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Source of uniform choices for the policy's random tiers.
pub trait RandomSource {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Production random source backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Creates a deterministic source from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for GameRng {
    fn pick(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Replays a fixed list of picks, cycling when exhausted.
///
/// Each pick is reduced modulo the requested length, so `FixedSequence::new([0])`
/// always takes the first candidate.
#[derive(Clone, Debug, Default)]
pub struct FixedSequence {
    picks: Vec<usize>,
    cursor: usize,
}

impl FixedSequence {
    /// Creates a sequence from `picks`. An empty list always picks 0.
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for FixedSequence {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        value % len
    }
}

/// Which rule of the cascade produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Tier {
    /// Completes a line for the mover.
    Win,
    /// Occupies the cell the opponent needs to complete a line.
    Block,
    /// Takes the center.
    Center,
    /// Takes a random free corner.
    Corner,
    /// Takes a random free side.
    Side,
}

/// Selects a move for `me` on `board`.
///
/// Returns `None` only when the board is full. The board is read, never
/// written.
pub fn select_move(board: &Board, me: Mark, rng: &mut impl RandomSource) -> Option<usize> {
    select_move_with_tier(board, me, rng).map(|(index, _)| index)
}

/// Like [`select_move`], also reporting which tier fired.
pub fn select_move_with_tier(
    board: &Board,
    me: Mark,
    rng: &mut impl RandomSource,
) -> Option<(usize, Tier)> {
    if let Some(index) = completing_move(board, me) {
        return Some((index, Tier::Win));
    }
    if let Some(index) = completing_move(board, me.opponent()) {
        return Some((index, Tier::Block));
    }
    if board.is_empty(CENTER) {
        return Some((CENTER, Tier::Center));
    }
    if let Some(index) = pick_free(board, &CORNERS, rng) {
        return Some((index, Tier::Corner));
    }
    pick_free(board, &SIDES, rng).map(|index| (index, Tier::Side))
}

/// Chooses the CPU's move for the mark to play in `state`.
///
/// # Errors
///
/// [`PolicyError::InvalidInvocation`] if the game is over or the board full.
#[instrument(skip_all, fields(mark = %state.current()))]
pub fn choose_move(state: &GameState, rng: &mut impl RandomSource) -> Result<usize, PolicyError> {
    if state.is_terminal() {
        return Err(PolicyError::InvalidInvocation);
    }
    let (index, tier) = select_move_with_tier(state.board(), state.current(), rng)
        .ok_or(PolicyError::InvalidInvocation)?;
    debug!(index, %tier, "CPU selected move");
    Ok(index)
}

/// First empty index (ascending) where placing `mark` completes a line.
fn completing_move(board: &Board, mark: Mark) -> Option<usize> {
    board
        .empty_indices()
        .find(|&index| has_line(&board.with_mark(index, mark), mark))
}

/// Uniformly random free cell among `candidates`.
fn pick_free(board: &Board, candidates: &[usize], rng: &mut impl RandomSource) -> Option<usize> {
    let free: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&index| board.is_empty(index))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.pick(free.len()) % free.len()])
}
