//! Multi-user task tracking HTTP API.
//!
//! Users register and log in to receive an HS256 bearer token; every `/task`
//! route is gated by token verification and scoped to the caller's own rows.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use services::TaskService;

use axum::{
    body::Body,
    http::Request,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use handlers::http;

/// Build the API router (auth, tasks, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let task_routes = axum::Router::new()
        .route("/", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/:id",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_bearer,
        ));

    axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/health", get(http::health))
        .nest("/task", task_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|req: &Request<Body>| {
                            let request_id = Uuid::new_v4();
                            tracing::info_span!(
                                "http_request",
                                %request_id,
                                method = %req.method(),
                                uri = %req.uri(),
                                status = tracing::field::Empty,
                            )
                        })
                        .on_response(
                            |res: &axum::http::Response<_>,
                             latency: std::time::Duration,
                             span: &tracing::Span| {
                                let status = res.status();
                                span.record("status", tracing::field::display(status));
                                let latency_ms = latency.as_millis() as u64;
                                if status.is_server_error() {
                                    tracing::error!(%status, latency_ms, "response");
                                } else {
                                    tracing::info!(%status, latency_ms, "response");
                                }
                            },
                        ),
                )
                .layer(axum::middleware::from_fn(middleware::cors::cors)),
        )
}
