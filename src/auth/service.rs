//! Credential service: registration, login, password hashing.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::jwt::TokenSigner;
use crate::error::{AppError, AppResult};
use crate::repositories::Store;
use crate::services::with_deadline;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{info, instrument};

pub const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Registers identities and exchanges credentials for tokens.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn Store>,
    signer: TokenSigner,
    store_timeout: Duration,
    /// Verified against when the username is unknown, so both failure paths hash.
    dummy_hash: Arc<str>,
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn Store>,
        signer: TokenSigner,
        store_timeout: Duration,
    ) -> AppResult<Self> {
        let dummy_hash = hash_password("taskapi-dummy-password")?;
        Ok(Self {
            store,
            signer,
            store_timeout,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Create a user. Returns the new user id.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> AppResult<i64> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(AppError::Validation(
                "username and password are required".to_string(),
            ));
        }

        let hash = hash_blocking(password.to_string()).await?;
        let user_id =
            with_deadline(self.store_timeout, self.store.insert_user(username, &hash)).await?;
        info!(user_id, "user registered");
        Ok(user_id)
    }

    /// Check credentials and issue a token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(invalid_credentials());
        }

        let user = with_deadline(
            self.store_timeout,
            self.store.find_user_by_username(username),
        )
        .await?;

        let (user_id, hash) = match user {
            Some(u) => (Some(u.id), u.password),
            None => (None, self.dummy_hash.to_string()),
        };
        let matches = verify_blocking(password.to_string(), hash).await?;

        match user_id {
            Some(user_id) if matches => {
                info!(user_id, "login succeeded");
                self.signer.issue(user_id)
            }
            _ => Err(invalid_credentials()),
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::Auth(INVALID_CREDENTIALS.to_string())
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
        .to_string();
    Ok(hash)
}

/// Constant-time comparison against a PHC-format hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("parse hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

async fn hash_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task: {}", e)))?
}

async fn verify_blocking(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use tokio_test::assert_ok;

    fn service() -> (CredentialService, TokenSigner, MemoryStore) {
        let store = MemoryStore::new();
        let signer = TokenSigner::new("test-jwt-secret-min-32-chars!!!!", chrono::Duration::hours(24));
        let svc = CredentialService::new(
            Arc::new(store.clone()),
            signer.clone(),
            Duration::from_secs(5),
        )
        .unwrap();
        (svc, signer, store)
    }

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("mypassword").unwrap();
        assert!(verify_password("mypassword", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[tokio::test]
    async fn register_then_login_yields_token_for_new_user() {
        let (svc, signer, _) = service();
        let user_id = svc.register("al", "p1").await.unwrap();
        let token = svc.login("al", "p1").await.unwrap();
        assert_eq!(signer.verify(&token).unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn stored_credential_is_not_plaintext() {
        let (svc, _, store) = service();
        assert_ok!(svc.register("al", "p1").await);
        let row = store.find_user_by_username("al").await.unwrap().unwrap();
        assert_ne!(row.password, "p1");
        assert!(row.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts_regardless_of_password() {
        let (svc, _, _) = service();
        assert_ok!(svc.register("al", "p1").await);
        assert!(matches!(svc.register("al", "p1").await, Err(AppError::Conflict(_))));
        assert!(matches!(svc.register("al", "other").await, Err(AppError::Conflict(_))));
        assert!(matches!(svc.register("  al ", "x").await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let (svc, _, _) = service();
        for (u, p) in [("", "p"), ("u", ""), ("   ", "p"), ("u", "  ")] {
            assert!(matches!(svc.register(u, p).await, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_look_identical() {
        let (svc, _, _) = service();
        assert_ok!(svc.register("al", "p1").await);

        let unknown = svc.login("nobody", "p1").await.unwrap_err();
        let wrong = svc.login("al", "wrong").await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, AppError::Auth(ref m) if m == INVALID_CREDENTIALS));
    }
}
