pub mod analyzer;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod templates;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(routes::index))
        .route("/predict", post(routes::predict))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
