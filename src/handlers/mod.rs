//! HTTP request handlers.

pub mod extract;
pub mod http;
pub mod tasks;

pub use http::*;
pub use tasks::*;
