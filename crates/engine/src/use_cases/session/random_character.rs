use std::sync::Arc;

use charades_domain::{Character, ThemeId};

use super::SessionError;
use crate::infrastructure::ports::{CatalogRepo, RandomPort};

/// Pick a character of a theme uniformly at random, with its forbidden words.
pub struct RandomCharacter {
    catalog: Arc<dyn CatalogRepo>,
    random: Arc<dyn RandomPort>,
}

impl RandomCharacter {
    pub fn new(catalog: Arc<dyn CatalogRepo>, random: Arc<dyn RandomPort>) -> Self {
        Self { catalog, random }
    }

    pub async fn execute(&self, theme_id: ThemeId) -> Result<Character, SessionError> {
        let mut characters = self.catalog.list_characters_in_theme(theme_id).await?;
        if characters.is_empty() {
            return Err(SessionError::NoCharacters(theme_id));
        }
        let index = self.random.gen_index(characters.len());
        Ok(characters.swap_remove(index.min(characters.len() - 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCatalogRepo, MockRandomPort};
    use charades_domain::{CharacterId, ForbiddenWordText};

    #[tokio::test]
    async fn injected_random_picks_the_character() {
        let mut catalog = MockCatalogRepo::new();
        catalog.expect_list_characters_in_theme().returning(|theme_id| {
            Ok(vec![
                Character::new(CharacterId::from_i64(1), theme_id, "Mario", ""),
                Character::new(CharacterId::from_i64(2), theme_id, "Luigi", "")
                    .with_forbidden_word(ForbiddenWordText::new("green").expect("valid")),
            ])
        });
        let mut random = MockRandomPort::new();
        random
            .expect_gen_index()
            .withf(|len| *len == 2)
            .returning(|_| 1);

        let character = RandomCharacter::new(Arc::new(catalog), Arc::new(random))
            .execute(ThemeId::from_i64(1))
            .await
            .expect("character");

        assert_eq!(character.name, "Luigi");
        assert_eq!(character.forbidden_words.len(), 1);
    }

    #[tokio::test]
    async fn theme_without_characters_is_not_found() {
        let mut catalog = MockCatalogRepo::new();
        catalog
            .expect_list_characters_in_theme()
            .returning(|_| Ok(vec![]));
        let mut random = MockRandomPort::new();
        random.expect_gen_index().never();

        let result = RandomCharacter::new(Arc::new(catalog), Arc::new(random))
            .execute(ThemeId::from_i64(1))
            .await;
        assert!(matches!(result, Err(SessionError::NoCharacters(_))));
    }
}
