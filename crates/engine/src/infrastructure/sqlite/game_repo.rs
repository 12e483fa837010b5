//! Game sessions and their per-character progress.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use charades_domain::{
    CharacterId, Game, GameCharacterProgress, GameId, GameStatus, ThemeId, UserId,
};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::map_write_error;
use crate::infrastructure::ports::{
    ClockPort, CorrectGuess, GameRepo, GuessCommit, RepoError,
};

pub struct SqliteGameRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteGameRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }

    async fn status_of(&self, game_id: GameId) -> Result<Option<GameStatus>, RepoError> {
        let status: Option<String> = sqlx::query_scalar("SELECT status FROM games WHERE id = ?")
            .bind(game_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_game_status", e))?;
        status
            .map(|s| s.parse().map_err(RepoError::serialization))
            .transpose()
    }
}

fn row_to_game(row: &SqliteRow) -> Result<Game, RepoError> {
    let status: String = row.get("status");
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(RepoError::serialization)?;
    Ok(Game {
        id: GameId::from_i64(row.get("id")),
        user_id: UserId::from_i64(row.get("user_id")),
        theme_id: ThemeId::from_i64(row.get("theme_id")),
        status: status.parse().map_err(RepoError::serialization)?,
        created_at,
        progress: Vec::new(),
    })
}

fn row_to_progress(row: &SqliteRow) -> GameCharacterProgress {
    let guessed: i64 = row.get("guessed");
    GameCharacterProgress {
        game_id: GameId::from_i64(row.get("game_id")),
        character_id: CharacterId::from_i64(row.get("character_id")),
        guessed: guessed != 0,
    }
}

#[async_trait]
impl GameRepo for SqliteGameRepo {
    async fn get(&self, id: GameId) -> Result<Option<Game>, RepoError> {
        let row = sqlx::query(
            "SELECT id, user_id, theme_id, status, created_at FROM games WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_game", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut game = row_to_game(&row)?;

        let progress = sqlx::query(
            "SELECT game_id, character_id, guessed FROM game_characters WHERE game_id = ? ORDER BY id ASC",
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_game_progress", e))?;

        game.progress = progress.iter().map(row_to_progress).collect();
        Ok(Some(game))
    }

    async fn create(
        &self,
        user_id: UserId,
        theme_id: ThemeId,
        characters: &[CharacterId],
    ) -> Result<Game, RepoError> {
        let now = self.clock.now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("create_game", e))?;

        let result = sqlx::query(
            "INSERT INTO games (user_id, theme_id, status, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id.as_i64())
        .bind(theme_id.as_i64())
        .bind(GameStatus::Active.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error("create_game", e))?;
        let game_id = GameId::from_i64(result.last_insert_rowid());

        let mut progress = Vec::with_capacity(characters.len());
        for character_id in characters {
            sqlx::query("INSERT INTO game_characters (game_id, character_id) VALUES (?, ?)")
                .bind(game_id.as_i64())
                .bind(character_id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_write_error("create_game_character", e))?;
            progress.push(GameCharacterProgress {
                game_id,
                character_id: *character_id,
                guessed: false,
            });
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("create_game", e))?;

        Ok(Game {
            id: game_id,
            user_id,
            theme_id,
            status: GameStatus::Active,
            created_at: now,
            progress,
        })
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Game>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, user_id, theme_id, status, created_at FROM games WHERE user_id = ? ORDER BY id ASC",
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_games_for_user", e))?;

        let progress_rows = sqlx::query(
            r#"
            SELECT gc.game_id, gc.character_id, gc.guessed
            FROM game_characters gc
            JOIN games g ON g.id = gc.game_id
            WHERE g.user_id = ?
            ORDER BY gc.id ASC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_games_for_user", e))?;

        let mut progress: HashMap<GameId, Vec<GameCharacterProgress>> = HashMap::new();
        for row in &progress_rows {
            let p = row_to_progress(row);
            progress.entry(p.game_id).or_default().push(p);
        }

        rows.iter()
            .map(|row| {
                let mut game = row_to_game(row)?;
                game.progress = progress.remove(&game.id).unwrap_or_default();
                Ok(game)
            })
            .collect()
    }

    async fn record_correct_guess(&self, guess: &CorrectGuess) -> Result<GuessCommit, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("record_correct_guess", e))?;

        let marked = sqlx::query(
            "UPDATE game_characters SET guessed = 1 WHERE game_id = ? AND character_id = ? AND guessed = 0",
        )
        .bind(guess.game_id.as_i64())
        .bind(guess.character_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("mark_character_guessed", e))?;

        if marked.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| RepoError::database("record_correct_guess", e))?;
            let status = self.status_of(guess.game_id).await?;
            return Ok(GuessCommit {
                applied: false,
                game_completed: matches!(status, Some(GameStatus::Completed)),
            });
        }

        let credited = sqlx::query("UPDATE users SET score = score + ? WHERE id = ?")
            .bind(i64::from(guess.points))
            .bind(guess.user_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("credit_user_score", e))?;
        if credited.rows_affected() == 0 {
            return Err(RepoError::not_found("User", guess.user_id));
        }

        let remaining: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM game_characters WHERE game_id = ? AND guessed = 0",
        )
        .bind(guess.game_id.as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepoError::database("count_unguessed", e))?;

        let game_completed = remaining == 0;
        if game_completed {
            sqlx::query("UPDATE games SET status = ? WHERE id = ? AND status = ?")
                .bind(GameStatus::Completed.as_str())
                .bind(guess.game_id.as_i64())
                .bind(GameStatus::Active.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("complete_game", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("record_correct_guess", e))?;

        Ok(GuessCommit {
            applied: true,
            game_completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_repos;
    use super::super::SqliteRepositories;
    use super::*;
    use charades_domain::{CharacterName, NewCharacter, NewTheme, ThemeName, Username};

    use crate::infrastructure::ports::{CatalogRepo, UserRepo};

    struct Fixture {
        repos: SqliteRepositories,
        user_id: UserId,
        theme_id: ThemeId,
        characters: Vec<CharacterId>,
    }

    async fn fixture(names: &[&str]) -> Fixture {
        let repos = memory_repos().await;
        let theme = repos
            .catalog
            .create_theme(&NewTheme::new(ThemeName::new("Fantasy").expect("valid")))
            .await
            .expect("theme");
        let mut characters = Vec::new();
        for name in names {
            let created = repos
                .catalog
                .create_character(
                    &NewCharacter::new(theme.id, CharacterName::new(*name).expect("valid"), "")
                        .with_points(10),
                )
                .await
                .expect("character");
            characters.push(created.id);
        }
        let user = repos
            .user
            .get_or_create(&Username::new("alice").expect("valid"))
            .await
            .expect("user");
        Fixture {
            repos,
            user_id: user.id,
            theme_id: theme.id,
            characters,
        }
    }

    fn guess(game_id: GameId, character_id: CharacterId, user_id: UserId) -> CorrectGuess {
        CorrectGuess {
            game_id,
            character_id,
            user_id,
            points: 10,
        }
    }

    #[tokio::test]
    async fn create_keeps_progress_in_creation_order() {
        let f = fixture(&["Gandalf", "Frodo"]).await;
        let created = f
            .repos
            .game
            .create(f.user_id, f.theme_id, &[f.characters[1], f.characters[0]])
            .await
            .expect("create");

        let loaded = f.repos.game.get(created.id).await.expect("get").expect("exists");
        assert_eq!(loaded.status, GameStatus::Active);
        assert_eq!(loaded.current_target(), Some(f.characters[1]));
        assert_eq!(loaded.progress.len(), 2);
    }

    #[tokio::test]
    async fn last_correct_guess_completes_game_and_credits_user() {
        let f = fixture(&["Gandalf"]).await;
        let game = f
            .repos
            .game
            .create(f.user_id, f.theme_id, &f.characters)
            .await
            .expect("create");

        let commit = f
            .repos
            .game
            .record_correct_guess(&guess(game.id, f.characters[0], f.user_id))
            .await
            .expect("commit");

        assert!(commit.applied);
        assert!(commit.game_completed);
        let game = f.repos.game.get(game.id).await.expect("get").expect("exists");
        assert_eq!(game.status, GameStatus::Completed);
        let user = f.repos.user.get(f.user_id).await.expect("get").expect("exists");
        assert_eq!(user.score, 10);
    }

    #[tokio::test]
    async fn second_commit_of_same_row_is_not_applied() {
        let f = fixture(&["Gandalf", "Frodo"]).await;
        let game = f
            .repos
            .game
            .create(f.user_id, f.theme_id, &f.characters)
            .await
            .expect("create");
        let first = guess(game.id, f.characters[0], f.user_id);

        let commit = f.repos.game.record_correct_guess(&first).await.expect("first");
        assert!(commit.applied);
        assert!(!commit.game_completed);

        let repeat = f.repos.game.record_correct_guess(&first).await.expect("repeat");
        assert!(!repeat.applied);
        assert!(!repeat.game_completed);

        let user = f.repos.user.get(f.user_id).await.expect("get").expect("exists");
        assert_eq!(user.score, 10);
    }

    #[tokio::test]
    async fn list_for_user_groups_progress() {
        let f = fixture(&["Gandalf", "Frodo"]).await;
        f.repos
            .game
            .create(f.user_id, f.theme_id, &f.characters)
            .await
            .expect("create");
        f.repos
            .game
            .create(f.user_id, f.theme_id, &f.characters[..1])
            .await
            .expect("create");

        let games = f.repos.game.list_for_user(f.user_id).await.expect("list");
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].progress.len(), 2);
        assert_eq!(games[1].progress.len(), 1);
    }

    #[tokio::test]
    async fn deleting_character_removes_its_progress_rows() {
        let f = fixture(&["Gandalf", "Frodo"]).await;
        let game = f
            .repos
            .game
            .create(f.user_id, f.theme_id, &f.characters)
            .await
            .expect("create");

        f.repos
            .catalog
            .delete_character(f.characters[0])
            .await
            .expect("delete");

        let game = f.repos.game.get(game.id).await.expect("get").expect("exists");
        assert_eq!(game.progress.len(), 1);
        assert_eq!(game.current_target(), Some(f.characters[1]));
    }

    #[tokio::test]
    async fn deleting_last_unguessed_character_completes_game() {
        let f = fixture(&["Gandalf", "Frodo"]).await;
        let game = f
            .repos
            .game
            .create(f.user_id, f.theme_id, &f.characters)
            .await
            .expect("create");
        f.repos
            .game
            .record_correct_guess(&guess(game.id, f.characters[0], f.user_id))
            .await
            .expect("commit");

        f.repos
            .catalog
            .delete_character(f.characters[1])
            .await
            .expect("delete");

        let game = f.repos.game.get(game.id).await.expect("get").expect("exists");
        assert_eq!(game.status, GameStatus::Completed);
        assert_eq!(game.current_target(), None);
        assert_eq!(game.progress.len(), 1);
    }

    #[tokio::test]
    async fn deleting_only_character_drops_game() {
        let f = fixture(&["Gandalf", "Frodo"]).await;
        let lone = f
            .repos
            .game
            .create(f.user_id, f.theme_id, &f.characters[..1])
            .await
            .expect("create");
        let other = f
            .repos
            .game
            .create(f.user_id, f.theme_id, &f.characters)
            .await
            .expect("create");

        f.repos
            .catalog
            .delete_character(f.characters[0])
            .await
            .expect("delete");

        assert!(f.repos.game.get(lone.id).await.expect("get").is_none());
        let other = f.repos.game.get(other.id).await.expect("get").expect("exists");
        assert_eq!(other.status, GameStatus::Active);
        assert_eq!(other.current_target(), Some(f.characters[1]));
    }
}
