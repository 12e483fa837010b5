//! Helper types for port operations.

use charades_domain::{CharacterId, GameId, UserId};

/// A correct guess to be committed atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectGuess {
    pub game_id: GameId,
    pub character_id: CharacterId,
    pub user_id: UserId,
    pub points: u32,
}

/// Outcome of [`CorrectGuess`] commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessCommit {
    /// False when the progress row was already guessed (a concurrent
    /// submission won); nothing was written in that case.
    pub applied: bool,
    /// Whether the game is completed after this commit.
    pub game_completed: bool,
}
