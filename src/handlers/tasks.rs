//! Task HTTP handlers. All routes sit behind `require_bearer`.

use axum::{extract::State, http::StatusCode, Json};

use super::extract::{AppJson, AppPath};
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

/// GET /task
pub async fn list_tasks(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.tasks().list(user).await?))
}

/// POST /task
pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(body): AppJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = state.tasks().create(user, &body.name).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /task/:id
pub async fn update_task(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    tracing::debug!(task_id = id, "update requested");
    Ok(Json(state.tasks().set_done(user, id, body.done).await?))
}

/// DELETE /task/:id
pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.tasks().delete(user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
