//! Repository port traits for database access.

use async_trait::async_trait;
use charades_domain::{
    Character, CharacterId, ForbiddenWord, ForbiddenWordText, Game, GameId, NewCharacter,
    NewTheme, Theme, ThemeId, ThemeName, ThemeSummary, User, UserId, Username,
};

use super::error::RepoError;
use super::types::{CorrectGuess, GuessCommit};

// =============================================================================
// Catalog Store
// =============================================================================

/// Themes, characters and their forbidden words. Read-mostly for the game.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepo: Send + Sync {
    // Themes
    async fn get_theme(&self, id: ThemeId) -> Result<Option<Theme>, RepoError>;
    async fn get_theme_by_name(&self, name: &str) -> Result<Option<Theme>, RepoError>;
    async fn list_themes(&self) -> Result<Vec<ThemeSummary>, RepoError>;
    /// Fails with `ConstraintViolation` when the name is taken.
    async fn create_theme(&self, theme: &NewTheme) -> Result<Theme, RepoError>;
    /// Return the theme with this name, creating it when missing.
    async fn upsert_theme_by_name(&self, name: &ThemeName) -> Result<Theme, RepoError>;
    /// Cascades to characters, forbidden words and game rows. Returns false if absent.
    async fn delete_theme(&self, id: ThemeId) -> Result<bool, RepoError>;

    // Characters (always loaded with their forbidden words)
    async fn list_characters_in_theme(&self, theme_id: ThemeId)
        -> Result<Vec<Character>, RepoError>;
    /// Every character in the catalog, name-ascending.
    async fn list_characters(&self) -> Result<Vec<Character>, RepoError>;
    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn create_character(&self, character: &NewCharacter) -> Result<Character, RepoError>;
    /// Cascades to forbidden words and progress rows. Returns false if absent.
    async fn delete_character(&self, id: CharacterId) -> Result<bool, RepoError>;

    // Forbidden words
    /// Fails with `ConstraintViolation` on a duplicate word for the character.
    async fn add_forbidden_word(&self, word: &ForbiddenWord) -> Result<(), RepoError>;
    async fn remove_forbidden_word(
        &self,
        character_id: CharacterId,
        word: &ForbiddenWordText,
    ) -> Result<bool, RepoError>;
}

// =============================================================================
// Session/Game Store
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError>;
    /// Idempotent: the first registration of a username wins.
    async fn get_or_create(&self, username: &Username) -> Result<User, RepoError>;
    /// Highest scores first.
    async fn top_by_score(&self, limit: u32) -> Result<Vec<User>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepo: Send + Sync {
    /// Game with its progress rows in creation order.
    async fn get(&self, id: GameId) -> Result<Option<Game>, RepoError>;
    /// Insert an active game and one unguessed progress row per character,
    /// in a single transaction.
    async fn create(
        &self,
        user_id: UserId,
        theme_id: ThemeId,
        characters: &[CharacterId],
    ) -> Result<Game, RepoError>;
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Game>, RepoError>;
    /// Mark the progress row guessed, credit the user and complete the game
    /// when nothing is left to guess, all in one transaction. The row update
    /// is conditional on `guessed = false`, so only one caller can win.
    async fn record_correct_guess(&self, guess: &CorrectGuess) -> Result<GuessCommit, RepoError>;
}
