//! Route configuration

use crate::handlers;
use crate::middleware::session_layer;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router. The session layer wraps every route so each
/// handler sees a resolved `SessionId` and a freshly swept history.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Headroom over the configured file cap for multipart framing.
    let body_limit = state.config.max_file_size_bytes + 64 * 1024;

    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/upload", post(handlers::upload::upload))
        .route("/result/{filename}", get(handlers::images::result))
        .route("/images", get(handlers::images::list_images))
        .route("/image/{filename}", get(handlers::images::serve_image))
        .route("/clear_history", get(handlers::history::clear_history))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_layer,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
