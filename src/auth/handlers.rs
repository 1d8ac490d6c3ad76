//! Auth HTTP handlers: register, login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::handlers::extract::AppJson;
use crate::handlers::http::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 64))]
    pub username: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .credentials()
        .register(&body.username, &body.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user created".to_string(),
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state
        .credentials()
        .login(&body.username, &body.password)
        .await?;
    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_length_caps() {
        let ok = RegisterRequest {
            username: "al".to_string(),
            password: "p1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let long_name = RegisterRequest {
            username: "u".repeat(65),
            password: "p1".to_string(),
        };
        assert!(long_name.validate().is_err());

        let long_password = RegisterRequest {
            username: "al".to_string(),
            password: "p".repeat(129),
        };
        assert!(long_password.validate().is_err());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let body: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(body.username.is_empty() && body.password.is_empty());
    }
}
