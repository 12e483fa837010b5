//! Session use cases.
//!
//! Player identity and the start of a play session.

use std::sync::Arc;

mod random_character;
mod register_user;
mod start_game;

pub use random_character::RandomCharacter;
pub use register_user::RegisterUser;
pub use start_game::StartGame;

use charades_domain::{CharacterId, DomainError, ThemeId};

use crate::infrastructure::ports::RepoError;

/// Container for session use cases.
pub struct SessionUseCases {
    pub register_user: Arc<RegisterUser>,
    pub start_game: Arc<StartGame>,
    pub random_character: Arc<RandomCharacter>,
}

impl SessionUseCases {
    pub fn new(
        register_user: Arc<RegisterUser>,
        start_game: Arc<StartGame>,
        random_character: Arc<RandomCharacter>,
    ) -> Self {
        Self {
            register_user,
            start_game,
            random_character,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[source] DomainError),
    #[error("Theme not found: {0}")]
    ThemeNotFound(ThemeId),
    /// A game cannot start on a theme without characters.
    #[error("Theme {0} has no characters")]
    EmptyTheme(ThemeId),
    #[error("No characters found for theme {0}")]
    NoCharacters(ThemeId),
    #[error("Character {character_id} does not belong to theme {theme_id}")]
    CharacterNotInTheme {
        character_id: CharacterId,
        theme_id: ThemeId,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
