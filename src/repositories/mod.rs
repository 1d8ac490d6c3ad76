//! Persistence contract and its PostgreSQL / in-memory implementations.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Task, UserRow};

/// Everything the service layer needs from storage.
///
/// Every task operation takes the owner id and must apply it as a predicate
/// in the same statement that reads or writes the row.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user; `AppError::Conflict` if the username is taken.
    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<i64>;

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserRow>>;

    /// Tasks owned by `user_id`, oldest first.
    async fn list_tasks_for_user(&self, user_id: i64) -> AppResult<Vec<Task>>;

    async fn insert_task(&self, name: &str, user_id: i64) -> AppResult<Task>;

    /// `None` when no task with this id belongs to `user_id`.
    async fn update_task_done(&self, id: i64, user_id: i64, done: bool) -> AppResult<Option<Task>>;

    /// `false` when no task with this id belongs to `user_id`.
    async fn delete_task(&self, id: i64, user_id: i64) -> AppResult<bool>;

    /// Liveness check for `/health`.
    async fn ping(&self) -> AppResult<()>;
}
