//! PostgreSQL-backed store.

use async_trait::async_trait;

use super::Store;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Task, UserRow};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<i64> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| r.0)
            .ok_or_else(|| AppError::Conflict("user already exists".to_string()))
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_tasks_for_user(&self, user_id: i64) -> AppResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(
            "SELECT id, name, done, created_at, user_id FROM tasks WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_task(&self, name: &str, user_id: i64) -> AppResult<Task> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, done, created_at, user_id
            "#,
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_task_done(&self, id: i64, user_id: i64, done: bool) -> AppResult<Option<Task>> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET done = $1
            WHERE id = $2 AND user_id = $3
            RETURNING id, name, done, created_at, user_id
            "#,
        )
        .bind(done)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_task(&self, id: i64, user_id: i64) -> AppResult<bool> {
        let r = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
