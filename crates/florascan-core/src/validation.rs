//! Upload filename validation
//!
//! Cheap pre-save checks on the client-supplied filename. The extension
//! allow-set is authoritative; the deny-set is kept as defense-in-depth for
//! executable/script extensions. Content-based checks happen post-save in
//! `florascan-processing`.

use crate::error::AppError;

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
pub const DENIED_EXTENSIONS: &[&str] = &["php", "exe", "bat", "sh", "py", "js", "html", "htm"];

/// Characters never permitted in an uploaded filename.
pub const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const MAX_FILENAME_LENGTH: usize = 255;

/// Validate a client-supplied filename: non-empty, has an extension from the
/// allow-set (and not the deny-set), and contains no unsafe characters.
pub fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.is_empty() {
        return Err(AppError::Validation("Please choose a file".to_string()));
    }

    if filename.contains(UNSAFE_FILENAME_CHARS) {
        return Err(AppError::Validation(
            "Filename contains invalid characters".to_string(),
        ));
    }

    let Some((_, extension)) = filename.rsplit_once('.') else {
        return Err(AppError::Validation(
            "Invalid file type! Please upload an image.".to_string(),
        ));
    };
    let extension = extension.to_lowercase();

    if DENIED_EXTENSIONS.contains(&extension.as_str())
        || !ALLOWED_EXTENSIONS.contains(&extension.as_str())
    {
        return Err(AppError::Validation(
            "Invalid file type! Please upload an image.".to_string(),
        ));
    }

    Ok(())
}

/// Extract the lowercased extension after the final dot, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Sanitize a validated filename for use in a storage key. Keeps
/// alphanumerics, '.', '-' and '_'; anything else becomes '_'.
pub fn sanitize_filename(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['_', '.']).is_empty() {
        return "file".to_string();
    }

    sanitized
}
