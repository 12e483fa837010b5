//! Start game use case.
//!
//! Creates an active game for a user over a theme, with one progress row per
//! character to guess: a single chosen character, or every character of the
//! theme.

use std::sync::Arc;

use charades_domain::{CharacterId, Game, ThemeId, Username};

use super::SessionError;
use crate::infrastructure::ports::{CatalogRepo, GameRepo, UserRepo};

pub struct StartGame {
    users: Arc<dyn UserRepo>,
    catalog: Arc<dyn CatalogRepo>,
    games: Arc<dyn GameRepo>,
}

impl StartGame {
    pub fn new(
        users: Arc<dyn UserRepo>,
        catalog: Arc<dyn CatalogRepo>,
        games: Arc<dyn GameRepo>,
    ) -> Self {
        Self {
            users,
            catalog,
            games,
        }
    }

    pub async fn execute(
        &self,
        username: &str,
        theme_id: ThemeId,
        character_id: Option<CharacterId>,
    ) -> Result<Game, SessionError> {
        let username = Username::new(username).map_err(SessionError::InvalidUsername)?;

        self.catalog
            .get_theme(theme_id)
            .await?
            .ok_or(SessionError::ThemeNotFound(theme_id))?;

        let characters = self.catalog.list_characters_in_theme(theme_id).await?;
        if characters.is_empty() {
            return Err(SessionError::EmptyTheme(theme_id));
        }

        let targets: Vec<CharacterId> = match character_id {
            Some(id) => {
                if !characters.iter().any(|c| c.id == id) {
                    return Err(SessionError::CharacterNotInTheme {
                        character_id: id,
                        theme_id,
                    });
                }
                vec![id]
            }
            None => characters.iter().map(|c| c.id).collect(),
        };

        let user = self.users.get_or_create(&username).await?;
        let game = self.games.create(user.id, theme_id, &targets).await?;

        tracing::info!(
            game_id = %game.id,
            user_id = %user.id,
            theme_id = %theme_id,
            characters = targets.len(),
            "Game started"
        );
        Ok(game)
    }
}
