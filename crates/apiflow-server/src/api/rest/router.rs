//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and text fields on top of the file itself
const FORM_OVERHEAD: usize = 1024 * 1024;

/// Create REST API router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.upload.max_file_size().saturating_add(FORM_OVERHEAD);

    let api = Router::new()
        .route("/generate/json", post(generate_json))
        .route("/rewrite", post(rewrite))
        .route("/deluge", post(deluge))
        .route("/create/actions", post(create_actions))
        .route("/generate/app", post(generate_app));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
