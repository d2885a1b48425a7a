//! Shared key generation for stored uploads.
//!
//! Key format: `{timestamp}_{sanitized-filename}` with a `%Y%m%d_%H%M%S`
//! timestamp, so keys sort chronologically and never collide with each other
//! across seconds.

use chrono::{DateTime, Utc};

/// Generate a storage key for an upload received at `now`.
///
/// The filename must already be sanitized; this function only prefixes the
/// timestamp.
pub fn generate_storage_key(now: DateTime<Utc>, sanitized_filename: &str) -> String {
    format!("{}_{}", now.format("%Y%m%d_%H%M%S"), sanitized_filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn key_is_timestamp_prefixed() {
        let at = Utc.with_ymd_and_hms(2026, 8, 30, 14, 5, 9).unwrap();
        assert_eq!(
            generate_storage_key(at, "dandelion.jpg"),
            "20260830_140509_dandelion.jpg"
        );
    }
}
