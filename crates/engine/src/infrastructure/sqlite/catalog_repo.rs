//! Catalog repository: themes, characters and forbidden words.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use charades_domain::{
    Character, CharacterId, ForbiddenWord, ForbiddenWordText, GameStatus, NewCharacter, NewTheme,
    Theme, ThemeId, ThemeName, ThemeSummary,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{map_write_error, to_u32};
use crate::infrastructure::ports::{CatalogRepo, ClockPort, RepoError};

pub struct SqliteCatalogRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCatalogRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }

    /// Forbidden words for the given characters, grouped by character id.
    async fn words_for(
        &self,
        query: &str,
        bind: Option<i64>,
    ) -> Result<HashMap<i64, Vec<ForbiddenWordText>>, RepoError> {
        let mut q = sqlx::query(query);
        if let Some(value) = bind {
            q = q.bind(value);
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("load_forbidden_words", e))?;

        let mut words: HashMap<i64, Vec<ForbiddenWordText>> = HashMap::new();
        for row in rows {
            let character_id: i64 = row.get("character_id");
            let word: String = row.get("word");
            let word = ForbiddenWordText::new(word).map_err(RepoError::serialization)?;
            words.entry(character_id).or_default().push(word);
        }
        Ok(words)
    }

    fn attach_words(
        rows: Vec<SqliteRow>,
        mut words: HashMap<i64, Vec<ForbiddenWordText>>,
    ) -> Result<Vec<Character>, RepoError> {
        rows.iter()
            .map(|row| {
                let mut character = row_to_character(row)?;
                character.forbidden_words = words.remove(&character.id.as_i64()).unwrap_or_default();
                Ok(character)
            })
            .collect()
    }
}

fn row_to_theme(row: &SqliteRow) -> Theme {
    Theme {
        id: ThemeId::from_i64(row.get("id")),
        name: row.get("name"),
        image_url: row.get("image_url"),
    }
}

fn row_to_character(row: &SqliteRow) -> Result<Character, RepoError> {
    let points: i64 = row.get("points");
    Ok(Character {
        id: CharacterId::from_i64(row.get("id")),
        theme_id: ThemeId::from_i64(row.get("theme_id")),
        name: row.get("name"),
        image_url: row.get("image_url"),
        points: to_u32(points, "points")?,
        forbidden_words: Vec::new(),
    })
}

const CHARACTER_COLUMNS: &str = "id, theme_id, name, image_url, points";

#[async_trait]
impl CatalogRepo for SqliteCatalogRepo {
    async fn get_theme(&self, id: ThemeId) -> Result<Option<Theme>, RepoError> {
        let row = sqlx::query("SELECT id, name, image_url FROM themes WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_theme", e))?;
        Ok(row.as_ref().map(row_to_theme))
    }

    async fn get_theme_by_name(&self, name: &str) -> Result<Option<Theme>, RepoError> {
        let row = sqlx::query("SELECT id, name, image_url FROM themes WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_theme_by_name", e))?;
        Ok(row.as_ref().map(row_to_theme))
    }

    async fn list_themes(&self) -> Result<Vec<ThemeSummary>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name, t.image_url, COUNT(c.id) AS character_count
            FROM themes t
            LEFT JOIN characters c ON c.theme_id = t.id
            GROUP BY t.id
            ORDER BY t.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_themes", e))?;

        rows.iter()
            .map(|row| {
                let count: i64 = row.get("character_count");
                Ok(ThemeSummary {
                    theme: row_to_theme(row),
                    character_count: to_u32(count, "character_count")?,
                })
            })
            .collect()
    }

    async fn create_theme(&self, theme: &NewTheme) -> Result<Theme, RepoError> {
        let result =
            sqlx::query("INSERT INTO themes (name, image_url, created_at) VALUES (?, ?, ?)")
                .bind(theme.name.as_str())
                .bind(theme.image_url.as_deref())
                .bind(self.clock.now())
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error("create_theme", e))?;

        Ok(Theme {
            id: ThemeId::from_i64(result.last_insert_rowid()),
            name: theme.name.to_string(),
            image_url: theme.image_url.clone(),
        })
    }

    async fn upsert_theme_by_name(&self, name: &ThemeName) -> Result<Theme, RepoError> {
        sqlx::query(
            "INSERT INTO themes (name, created_at) VALUES (?, ?) ON CONFLICT(name) DO NOTHING",
        )
        .bind(name.as_str())
        .bind(self.clock.now())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("upsert_theme_by_name", e))?;

        self.get_theme_by_name(name.as_str())
            .await?
            .ok_or_else(|| RepoError::not_found("Theme", name))
    }

    async fn delete_theme(&self, id: ThemeId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM themes WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_theme", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_characters_in_theme(
        &self,
        theme_id: ThemeId,
    ) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM characters WHERE theme_id = ? ORDER BY id ASC",
            CHARACTER_COLUMNS
        ))
        .bind(theme_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_characters_in_theme", e))?;

        let words = self
            .words_for(
                r#"
                SELECT fw.character_id, fw.word
                FROM forbidden_words fw
                JOIN characters c ON c.id = fw.character_id
                WHERE c.theme_id = ?
                ORDER BY fw.id ASC
                "#,
                Some(theme_id.as_i64()),
            )
            .await?;

        Self::attach_words(rows, words)
    }

    async fn list_characters(&self) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM characters ORDER BY name ASC, id ASC",
            CHARACTER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_characters", e))?;

        let words = self
            .words_for(
                "SELECT character_id, word FROM forbidden_words ORDER BY id ASC",
                None,
            )
            .await?;

        Self::attach_words(rows, words)
    }

    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM characters WHERE id = ?",
            CHARACTER_COLUMNS
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_character", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let words = self
            .words_for(
                "SELECT character_id, word FROM forbidden_words WHERE character_id = ? ORDER BY id ASC",
                Some(id.as_i64()),
            )
            .await?;

        Ok(Self::attach_words(vec![row], words)?.into_iter().next())
    }

    async fn create_character(&self, character: &NewCharacter) -> Result<Character, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO characters (theme_id, name, image_url, points, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(character.theme_id.as_i64())
        .bind(character.name.as_str())
        .bind(&character.image_url)
        .bind(i64::from(character.points))
        .bind(self.clock.now())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("create_character", e))?;

        Ok(Character::new(
            CharacterId::from_i64(result.last_insert_rowid()),
            character.theme_id,
            character.name.as_str(),
            character.image_url.clone(),
        )
        .with_points(character.points))
    }

    async fn delete_character(&self, id: CharacterId) -> Result<bool, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;

        let affected_games: Vec<i64> =
            sqlx::query_scalar("SELECT DISTINCT game_id FROM game_characters WHERE character_id = ?")
                .bind(id.as_i64())
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| RepoError::database("load_affected_games", e))?;

        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;

        // The cascade took this character's progress rows; settle the games
        // that held them.
        for game_id in affected_games {
            sqlx::query(
                "DELETE FROM games WHERE id = ? \
                 AND NOT EXISTS (SELECT 1 FROM game_characters WHERE game_id = games.id)",
            )
            .bind(game_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("drop_empty_game", e))?;

            sqlx::query(
                "UPDATE games SET status = ? WHERE id = ? AND status = ? \
                 AND NOT EXISTS \
                 (SELECT 1 FROM game_characters WHERE game_id = games.id AND guessed = 0)",
            )
            .bind(GameStatus::Completed.as_str())
            .bind(game_id)
            .bind(GameStatus::Active.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("complete_game", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_forbidden_word(&self, word: &ForbiddenWord) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO forbidden_words (character_id, word) VALUES (?, ?)")
            .bind(word.character_id.as_i64())
            .bind(word.word.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("add_forbidden_word", e))?;
        Ok(())
    }

    async fn remove_forbidden_word(
        &self,
        character_id: CharacterId,
        word: &ForbiddenWordText,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM forbidden_words WHERE character_id = ? AND word = ?")
            .bind(character_id.as_i64())
            .bind(word.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("remove_forbidden_word", e))?;
        Ok(result.rows_affected() > 0)
    }
}
