//! Business logic: owner-scoped task operations and store deadlines.

pub mod tasks;

pub use tasks::TaskService;

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Run a store call, failing with `AppError::Timeout` once `limit` elapses.
pub async fn with_deadline<T, F>(limit: Duration, call: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(limit_ms = limit.as_millis() as u64, "store call timed out");
            Err(AppError::Timeout)
        }
    }
}
