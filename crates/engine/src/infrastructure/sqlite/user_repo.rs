use std::sync::Arc;

use async_trait::async_trait;
use charades_domain::{User, UserId, Username};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::map_write_error;
use crate::infrastructure::ports::{ClockPort, RepoError, UserRepo};

pub struct SqliteUserRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }
}

fn row_to_user(row: &SqliteRow) -> Result<User, RepoError> {
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(RepoError::serialization)?;
    Ok(User {
        id: UserId::from_i64(row.get("id")),
        username: row.get("username"),
        score: row.get("score"),
        created_at,
    })
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let row = sqlx::query("SELECT id, username, score, created_at FROM users WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_user", e))?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_or_create(&self, username: &Username) -> Result<User, RepoError> {
        sqlx::query(
            "INSERT INTO users (username, created_at) VALUES (?, ?) ON CONFLICT(username) DO NOTHING",
        )
        .bind(username.as_str())
        .bind(self.clock.now())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("get_or_create_user", e))?;

        let row =
            sqlx::query("SELECT id, username, score, created_at FROM users WHERE username = ?")
                .bind(username.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepoError::database("get_or_create_user", e))?;
        row_to_user(&row)
    }

    async fn top_by_score(&self, limit: u32) -> Result<Vec<User>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, username, score, created_at FROM users ORDER BY score DESC, id ASC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("top_users_by_score", e))?;
        rows.iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_repos;
    use super::*;

    #[tokio::test]
    async fn get_or_create_is_first_seen_wins() {
        let repos = memory_repos().await;
        let name = Username::new("  alice ").expect("valid");

        let first = repos.user.get_or_create(&name).await.expect("create");
        let again = repos.user.get_or_create(&name).await.expect("get");

        assert_eq!(first.id, again.id);
        assert_eq!(first.username, "alice");
        assert_eq!(first.score, 0);
    }

    #[tokio::test]
    async fn top_by_score_orders_and_limits() {
        let repos = memory_repos().await;
        for name in ["a", "b", "c"] {
            repos
                .user
                .get_or_create(&Username::new(name).expect("valid"))
                .await
                .expect("create");
        }

        let top = repos.user.top_by_score(2).await.expect("top");
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].username, "a");
    }
}
