//! Result and image retrieval handlers
//!
//! All three endpoints are gated on the session's history: a filename that
//! the session never uploaded (or that has expired out) is a 404, regardless
//! of whether the file exists on disk.

use crate::error::{storage_error_to_app, HttpAppError};
use crate::session::SessionId;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use florascan_core::{validation, AppError};
use florascan_services::HistoryEntry;
use florascan_storage::Storage;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HistoryItem {
    pub filename: String,
    pub result: florascan_core::models::NormalizedResult,
}

impl From<HistoryEntry> for HistoryItem {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            filename: entry.filename,
            result: entry.result,
        }
    }
}

/// `GET /result/{filename}` — one identification from the session history.
pub async fn result(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Path(filename): Path<String>,
) -> Result<Json<florascan_core::models::NormalizedResult>, HttpAppError> {
    let result = state
        .history
        .get(&session.0, &filename)
        .ok_or_else(|| AppError::NotFound(format!("No result for {}", filename)))?;

    Ok(Json(result))
}

/// `GET /images` — the session's history, insertion-ordered.
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
) -> Json<Vec<HistoryItem>> {
    let items = state
        .history
        .list(&session.0)
        .into_iter()
        .map(HistoryItem::from)
        .collect();
    Json(items)
}

/// `GET /image/{filename}` — serve the stored bytes, session-gated.
#[tracing::instrument(skip_all, fields(session = %session.0, filename = %filename))]
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    // Traversal characters never reach the storage layer.
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(AppError::Validation("Invalid filename".to_string()).into());
    }

    let extension = validation::file_extension(&filename)
        .ok_or_else(|| AppError::Validation("Invalid filename".to_string()))?;
    if !validation::ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation("Invalid filename".to_string()).into());
    }

    if !state.history.contains(&session.0, &filename) {
        return Err(AppError::NotFound(format!("File not found: {}", filename)).into());
    }

    let data = state
        .storage
        .read(&filename)
        .await
        .map_err(storage_error_to_app)?;

    let content_type = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    };

    Ok((
        [(header::CONTENT_TYPE, content_type)],
        data,
    )
        .into_response())
}
