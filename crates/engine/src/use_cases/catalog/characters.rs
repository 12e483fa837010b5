use std::sync::Arc;

use charades_domain::{Character, CharacterId, ForbiddenWord, ForbiddenWordText};

use super::CatalogError;
use crate::infrastructure::ports::CatalogRepo;

/// Character and forbidden-word operations.
pub struct CharacterOps {
    catalog: Arc<dyn CatalogRepo>,
}

impl CharacterOps {
    pub fn new(catalog: Arc<dyn CatalogRepo>) -> Self {
        Self { catalog }
    }

    /// Every character, name-ascending, with forbidden words.
    pub async fn list(&self) -> Result<Vec<Character>, CatalogError> {
        Ok(self.catalog.list_characters().await?)
    }

    pub async fn delete(&self, id: CharacterId) -> Result<(), CatalogError> {
        if !self.catalog.delete_character(id).await? {
            return Err(CatalogError::CharacterNotFound(id));
        }
        tracing::info!(character_id = %id, "Character deleted");
        Ok(())
    }

    /// Store `word` trimmed and lowercase for the character.
    pub async fn add_forbidden_word(
        &self,
        character_id: CharacterId,
        word: &str,
    ) -> Result<ForbiddenWord, CatalogError> {
        let word = ForbiddenWordText::new(word)?;
        self.catalog
            .get_character(character_id)
            .await?
            .ok_or(CatalogError::CharacterNotFound(character_id))?;

        let entry = ForbiddenWord::new(character_id, word);
        self.catalog.add_forbidden_word(&entry).await.map_err(|e| {
            if e.is_constraint_violation() {
                CatalogError::DuplicateForbiddenWord(entry.word.to_string())
            } else {
                CatalogError::Repo(e)
            }
        })?;

        tracing::debug!(character_id = %character_id, word = %entry.word, "Forbidden word added");
        Ok(entry)
    }

    /// Idempotent: removing an absent word succeeds.
    pub async fn remove_forbidden_word(
        &self,
        character_id: CharacterId,
        word: &str,
    ) -> Result<(), CatalogError> {
        let word = ForbiddenWordText::new(word)?;
        let removed = self.catalog.remove_forbidden_word(character_id, &word).await?;
        tracing::debug!(character_id = %character_id, word = %word, removed, "Forbidden word removed");
        Ok(())
    }
}
