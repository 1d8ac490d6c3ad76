//! Middleware: bearer-token auth for `/task` routes, CORS for everything.

pub mod auth;
pub mod cors;

pub use auth::{require_bearer, AuthUser};
