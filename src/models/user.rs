//! User records as read back from the store.

use sqlx::FromRow;

/// Stored identity. `password` holds an Argon2 PHC string, never plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}
