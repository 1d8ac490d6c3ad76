//! Bearer-token gate for protected routes and the typed caller identity.
//!
//! A request moves through three states: no credentials inspected, token
//! extracted from `Authorization: Bearer <token>`, and authenticated. Any
//! failure ends the request with a 401; success stores an [`AuthUser`] in the
//! request extensions for handlers to extract.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{authorization::Bearer, Authorization, Header};
use tracing::debug;

use crate::auth::TokenSigner;
use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;

pub const AUTHORIZATION_REQUIRED: &str = "authorization required";
pub const MALFORMED_TOKEN: &str = "malformed token";

/// Authenticated caller, produced only by [`require_bearer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::Auth(AUTHORIZATION_REQUIRED.to_string()))
    }
}

/// Resolve the caller from request headers.
pub fn authenticate(headers: &HeaderMap, signer: &TokenSigner) -> AppResult<AuthUser> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Auth(AUTHORIZATION_REQUIRED.to_string()))?;
    let token =
        bearer_token(value).ok_or_else(|| AppError::Auth(MALFORMED_TOKEN.to_string()))?;
    let claims = signer.verify(&token)?;
    Ok(AuthUser(claims.user_id))
}

fn bearer_token(value: &HeaderValue) -> Option<String> {
    let header = Authorization::<Bearer>::decode(&mut std::iter::once(value)).ok()?;
    let token = header.token().trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token.to_string())
}

/// Middleware: reject unauthenticated requests, attach [`AuthUser`] otherwise.
/// CORS preflight (`OPTIONS`) passes through untouched.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    match authenticate(request.headers(), state.signer()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            debug!(reason = %err, method = %request.method(), uri = %request.uri(), "rejected request");
            err.into_response()
        }
    }
}
