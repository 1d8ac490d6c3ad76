//! In-process store: same contract as Postgres, kept in a `RwLock`.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::Store;
use crate::error::{AppError, AppResult};
use crate::models::{Task, UserRow};

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRow>,
    /// Keyed by id so iteration is creation order.
    tasks: BTreeMap<i64, Task>,
    next_user_id: i64,
    next_task_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<i64> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(username) {
            return Err(AppError::Conflict("user already exists".to_string()));
        }
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        inner.users.insert(
            username.to_string(),
            UserRow {
                id,
                username: username.to_string(),
                password: password_hash.to_string(),
            },
        );
        Ok(id)
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserRow>> {
        Ok(self.inner.read().await.users.get(username).cloned())
    }

    async fn list_tasks_for_user(&self, user_id: i64) -> AppResult<Vec<Task>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, name: &str, user_id: i64) -> AppResult<Task> {
        let mut inner = self.inner.write().await;
        if !inner.users.values().any(|u| u.id == user_id) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "tasks.user_id references unknown user {}",
                user_id
            )));
        }
        inner.next_task_id += 1;
        let task = Task {
            id: inner.next_task_id,
            name: name.to_string(),
            done: false,
            created_at: Utc::now(),
            user_id,
        };
        inner.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task_done(&self, id: i64, user_id: i64, done: bool) -> AppResult<Option<Task>> {
        let mut inner = self.inner.write().await;
        Ok(match inner.tasks.get_mut(&id) {
            Some(task) if task.user_id == user_id => {
                task.done = done;
                Some(task.clone())
            }
            _ => None,
        })
    }

    async fn delete_task(&self, id: i64, user_id: i64) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.tasks.get(&id) {
            Some(task) if task.user_id == user_id => {
                inner.tasks.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let store = MemoryStore::new();
        assert_ok!(store.insert_user("al", "h1").await);
        let err = assert_err!(store.insert_user("al", "h2").await);
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn task_ops_are_owner_scoped() {
        let store = MemoryStore::new();
        let a = store.insert_user("a", "h").await.unwrap();
        let b = store.insert_user("b", "h").await.unwrap();
        let task = store.insert_task("a's task", a).await.unwrap();

        assert!(store.list_tasks_for_user(b).await.unwrap().is_empty());
        assert!(store.update_task_done(task.id, b, true).await.unwrap().is_none());
        assert!(!store.delete_task(task.id, b).await.unwrap());

        let updated = store.update_task_done(task.id, a, true).await.unwrap().unwrap();
        assert!(updated.done);
        assert!(store.delete_task(task.id, a).await.unwrap());
        assert!(store.list_tasks_for_user(a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_creation_ordered() {
        let store = MemoryStore::new();
        let a = store.insert_user("a", "h").await.unwrap();
        for name in ["one", "two", "three"] {
            store.insert_task(name, a).await.unwrap();
        }
        let names: Vec<_> = store
            .list_tasks_for_user(a)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["one", "two", "three"]);
    }
}
