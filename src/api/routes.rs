//! Shared state and router construction.
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::model::AestheticModel;

/// Loaded once at startup and shared read-only by every request.
pub struct AppState {
    pub model: Arc<dyn AestheticModel>,
}

pub fn router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/score", post(handlers::score))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
