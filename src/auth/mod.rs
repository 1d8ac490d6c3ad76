//! Authentication: credentials, password hashing, identity tokens.

pub mod jwt;
mod handlers;
mod service;

pub use handlers::{login, register};
pub use jwt::{Claims, TokenSigner};
pub use service::{CredentialService, INVALID_CREDENTIALS};
