//! History reset handler

use crate::session::SessionId;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use std::sync::Arc;

/// `GET /clear_history` — drop the session's history and files, reset the
/// upload counter, and send the browser back to the form.
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
) -> Response {
    state.history.clear(&session.0).await;

    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, header::HeaderValue::from_static("/"))],
    )
        .into_response()
}
