//! Game entity - one play session of a user over a theme
//!
//! A game owns one progress row per character that must be guessed. The
//! status moves `active -> completed` exactly once, when the last unguessed
//! row is resolved; `completed` is terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CharacterId, DomainError, GameId, ThemeId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::parse(format!("unknown game status '{}'", other))),
        }
    }
}

/// Whether a character of the game has been identified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCharacterProgress {
    pub game_id: GameId,
    pub character_id: CharacterId,
    pub guessed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub user_id: UserId,
    pub theme_id: ThemeId,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
    /// Progress rows in creation order.
    pub progress: Vec<GameCharacterProgress>,
}

impl Game {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// The character currently being guessed: the first unguessed row.
    pub fn current_target(&self) -> Option<CharacterId> {
        self.progress
            .iter()
            .find(|p| !p.guessed)
            .map(|p| p.character_id)
    }
}
