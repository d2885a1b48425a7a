//! Upload pipeline handler
//!
//! `POST /upload` runs the full identification pipeline: rate-limit check,
//! multipart extraction, filename validation, save, image safety check,
//! content-hash cache lookup, external identification, normalization, and
//! history insertion. Every failure after the save deletes the stored file,
//! and every failure redirects back to the form with a flash message rather
//! than surfacing a JSON error.

use crate::handlers::flash_redirect;
use crate::session::SessionId;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use chrono::Utc;
use florascan_core::{validation, AppError, ErrorMetadata};
use florascan_processing::{content_hash_bytes, verify_image};
use florascan_storage::{generate_storage_key, Storage};
use std::sync::Arc;

/// Extract the file data and client-supplied filename from the multipart
/// form. Exactly one field named "file" is accepted.
async fn extract_upload_file(mut multipart: Multipart) -> Result<(Vec<u8>, String), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart form: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file_data.is_some() {
                return Err(AppError::Validation(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            filename = field.file_name().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file data: {}", e)))?;
            file_data = Some(data.to_vec());
        }
    }

    let file_data = file_data.ok_or_else(|| AppError::Validation("Please choose a file".to_string()))?;
    let filename = filename.unwrap_or_default();

    Ok((file_data, filename))
}

#[tracing::instrument(skip_all, fields(session = %session.0))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    multipart: Multipart,
) -> Response {
    match run_pipeline(&state, &session, multipart).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, code = err.error_code(), "Upload rejected");
            flash_redirect(&err.client_message())
        }
    }
}

async fn run_pipeline(
    state: &AppState,
    session: &SessionId,
    multipart: Multipart,
) -> Result<Response, AppError> {
    // Budget check happens before any file I/O.
    state.history.check_upload_allowed(&session.0)?;

    let (data, original_filename) = extract_upload_file(multipart).await?;

    validation::validate_filename(&original_filename)?;
    if data.is_empty() {
        return Err(AppError::Validation("Please choose a file".to_string()));
    }
    if data.len() > state.config.max_file_size_bytes {
        return Err(AppError::Validation(format!(
            "File size exceeds the maximum of {} MB",
            state.config.max_file_size_bytes / 1024 / 1024
        )));
    }

    let sanitized = validation::sanitize_filename(&original_filename);
    let storage_key = generate_storage_key(Utc::now(), &sanitized);

    // A save that fails mid-write must not leave a partial file behind.
    if let Err(e) = state.storage.save(&storage_key, data.clone()).await {
        delete_saved_file(state, &storage_key).await;
        return Err(AppError::Storage(e.to_string()));
    }

    // Decode to prove the bytes really are an image; extension alone is not
    // trusted. The saved file goes away on failure.
    let sniff_data = data.clone();
    let sniffed = tokio::task::spawn_blocking(move || verify_image(&sniff_data))
        .await
        .map_err(|e| AppError::Internal(format!("Safety check task failed: {}", e)))?;

    let sniffed = match sniffed {
        Ok(sniffed) => sniffed,
        Err(e) => {
            delete_saved_file(state, &storage_key).await;
            return Err(AppError::SafetyCheck(e.to_string()));
        }
    };

    tracing::debug!(
        filename = %storage_key,
        mime = sniffed.mime_type,
        width = sniffed.width,
        height = sniffed.height,
        "Image passed safety check"
    );

    let hash = content_hash_bytes(&data);

    let raw = match state.cache.get(&hash) {
        Some(raw) => {
            tracing::info!(hash = %hash, "Identification served from cache");
            raw
        }
        None => {
            let raw = match state.provider.identify(&data).await {
                Ok(raw) => raw,
                Err(e) => {
                    delete_saved_file(state, &storage_key).await;
                    return Err(e);
                }
            };
            state.cache.put(hash, raw.clone());
            raw
        }
    };

    let result = florascan_core::models::normalize(&raw);

    // Every completed pipeline run counts against the budget, plant or not.
    state.history.record_upload(&session.0);

    if !result.is_plant {
        delete_saved_file(state, &storage_key).await;
        tracing::info!(session = %session.0, "Upload completed but image is not a plant");
        return Ok(flash_redirect(
            "Plant is unknown. The image does not appear to contain a plant.",
        ));
    }

    state
        .history
        .add(&session.0, storage_key.clone(), result);

    tracing::info!(session = %session.0, filename = %storage_key, "Upload identified");

    let location = format!("/result/{}", storage_key);
    Ok((
        StatusCode::SEE_OTHER,
        [(
            header::LOCATION,
            header::HeaderValue::from_str(&location)
                .map_err(|e| AppError::Internal(format!("Invalid redirect target: {}", e)))?,
        )],
    )
        .into_response())
}

/// Best-effort cleanup of a partially processed upload.
async fn delete_saved_file(state: &AppState, storage_key: &str) {
    if let Err(e) = state.storage.delete(storage_key).await {
        tracing::warn!(
            error = %e,
            filename = %storage_key,
            "Failed to delete rejected upload, continuing"
        );
    }
}
