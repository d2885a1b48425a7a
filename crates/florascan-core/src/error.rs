//! Error types module
//!
//! All failures in the upload-to-result pipeline are unified under the
//! `AppError` enum. Each variant knows how it should be presented over HTTP
//! through the `ErrorMetadata` trait, so handlers never hand-pick status
//! codes or decide which messages are safe to show.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like rate limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether internal details must be hidden from the response
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Safety check failed: {0}")]
    SafetyCheck(String),

    #[error("Identification service error (status {status}): {message}")]
    ExternalService { status: u16, message: String },

    #[error("Identification service timed out after {0} seconds")]
    Timeout(u64),

    #[error("Upload limit reached: {used}/{limit} uploads in this session")]
    RateLimitExceeded { used: u32, limit: u32 },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

/// Static metadata per variant: (http_status, error_code, recoverable, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        AppError::Validation(_) => (400, "VALIDATION_ERROR", false, false, LogLevel::Debug),
        AppError::SafetyCheck(_) => (400, "SAFETY_CHECK_FAILED", false, false, LogLevel::Warn),
        AppError::ExternalService { .. } => {
            (502, "IDENTIFICATION_SERVICE_ERROR", true, false, LogLevel::Error)
        }
        AppError::Timeout(_) => (504, "IDENTIFICATION_TIMEOUT", true, false, LogLevel::Warn),
        AppError::RateLimitExceeded { .. } => {
            (429, "UPLOAD_LIMIT_REACHED", false, false, LogLevel::Debug)
        }
        AppError::Storage(_) => (500, "STORAGE_ERROR", true, true, LogLevel::Error),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, false, LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::SafetyCheck(_) => {
                "The uploaded file did not pass the image security check".to_string()
            }
            AppError::ExternalService { status, .. } => format!(
                "The identification service returned an error (status {}). Please try again later.",
                status
            ),
            AppError::Timeout(_) => {
                "The identification service did not respond in time. Please try again.".to_string()
            }
            AppError::RateLimitExceeded { limit, .. } => format!(
                "You have reached the limit of {} uploads. Clear your history to continue.",
                limit
            ),
            AppError::NotFound(msg) => msg.clone(),
            // Sensitive variants: never leak paths or internals to the client
            AppError::Storage(_) | AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Something went wrong processing your upload. Please try again.".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_errors_hide_internal_details() {
        let err = AppError::Storage("/var/lib/florascan/uploads is not writable".to_string());
        assert!(err.is_sensitive());
        assert!(!err.client_message().contains("/var/lib"));
    }

    #[test]
    fn rate_limit_maps_to_429() {
        let err = AppError::RateLimitExceeded { used: 10, limit: 10 };
        assert_eq!(err.http_status_code(), 429);
        assert_eq!(err.error_code(), "UPLOAD_LIMIT_REACHED");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn timeout_is_recoverable() {
        let err = AppError::Timeout(30);
        assert_eq!(err.http_status_code(), 504);
        assert!(err.is_recoverable());
        assert!(err.client_message().contains("try again"));
    }

    #[test]
    fn validation_message_passes_through() {
        let err = AppError::Validation("Invalid file type".to_string());
        assert_eq!(err.client_message(), "Invalid file type");
        assert_eq!(err.http_status_code(), 400);
    }
}
