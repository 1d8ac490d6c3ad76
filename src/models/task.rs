//! Task records and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A to-do item owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    /// Owner; never leaves the server.
    #[serde(skip_serializing)]
    pub user_id: i64,
}

/// Body of `POST /task`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
}

/// Body of `PATCH /task/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_task_omits_owner() {
        let task = Task {
            id: 7,
            name: "buy milk".to_string(),
            done: false,
            created_at: Utc::now(),
            user_id: 42,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "buy milk");
        assert_eq!(json["done"], false);
        assert!(json["created_at"].as_str().is_some_and(|s| !s.is_empty()));
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn update_request_requires_done() {
        assert!(serde_json::from_str::<UpdateTaskRequest>(r#"{"done":true}"#).unwrap().done);
        assert!(serde_json::from_str::<UpdateTaskRequest>("{}").is_err());
    }
}
