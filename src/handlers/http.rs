//! Shared application state and the health probe.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::json;

use crate::auth::{CredentialService, TokenSigner};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::repositories::Store;
use crate::services::{with_deadline, TaskService};

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub credentials: CredentialService,
    pub tasks: TaskService,
    pub signer: TokenSigner,
    pub store_timeout: std::time::Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> AppResult<Self> {
        let signer = TokenSigner::new(&config.jwt_secret, config.token_ttl);
        let credentials =
            CredentialService::new(store.clone(), signer.clone(), config.store_timeout)?;
        let tasks = TaskService::new(store.clone(), config.store_timeout);
        Ok(Self {
            store,
            credentials,
            tasks,
            signer,
            store_timeout: config.store_timeout,
        })
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }
    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}

/// GET /health — liveness probe, including a store round trip.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    with_deadline(state.store_timeout, state.store().ping())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "health check failed");
            AppError::Unavailable("store unreachable".to_string())
        })?;
    Ok(Json(json!({ "status": "ok", "service": "taskapi" })))
}
