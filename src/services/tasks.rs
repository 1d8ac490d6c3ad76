//! Task operations. Every call is bound to the authenticated caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::with_deadline;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::models::Task;
use crate::repositories::Store;

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
    store_timeout: Duration,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, caller: AuthUser) -> AppResult<Vec<Task>> {
        with_deadline(self.store_timeout, self.store.list_tasks_for_user(caller.0)).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, caller: AuthUser, name: &str) -> AppResult<Task> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("task name must not be empty".to_string()));
        }
        let task = with_deadline(self.store_timeout, self.store.insert_task(name, caller.0)).await?;
        info!(task_id = task.id, user_id = caller.0, "task created");
        Ok(task)
    }

    #[instrument(skip(self))]
    pub async fn set_done(&self, caller: AuthUser, id: i64, done: bool) -> AppResult<Task> {
        with_deadline(
            self.store_timeout,
            self.store.update_task_done(id, caller.0, done),
        )
        .await?
        .ok_or_else(not_found)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, caller: AuthUser, id: i64) -> AppResult<()> {
        let removed =
            with_deadline(self.store_timeout, self.store.delete_task(id, caller.0)).await?;
        if !removed {
            return Err(not_found());
        }
        info!(task_id = id, user_id = caller.0, "task deleted");
        Ok(())
    }
}

/// Same answer for "absent" and "someone else's".
fn not_found() -> AppError {
    AppError::NotFound("task not found".to_string())
}
