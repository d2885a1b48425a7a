//! Identification payload models
//!
//! The external identification API returns a loosely shaped nested JSON
//! document; every field here is optional and defaults when absent, so a
//! partial or malformed response can never panic the pipeline.
//! `normalize` flattens a raw payload into the fixed-shape record the
//! session history stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback name when the API returns no usable suggestion.
pub const UNKNOWN_PLANT_NAME: &str = "Plant is unknown";

/// Descriptions longer than this are cut and suffixed with
/// [`DESCRIPTION_SHORTENED_SUFFIX`].
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const DESCRIPTION_SHORTENED_SUFFIX: &str = "... [shortened]";

/// Raw response from the identification API. Untrusted and partial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIdentification {
    #[serde(default)]
    pub result: Option<RawResultBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResultBody {
    #[serde(default)]
    pub is_plant: Option<RawIsPlant>,
    #[serde(default)]
    pub classification: Option<RawClassification>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIsPlant {
    #[serde(default)]
    pub binary: Option<bool>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub suggestions: Vec<RawSuggestion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSuggestion {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub details: Option<RawDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDetails {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub edible_parts: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<RawDescription>,
    #[serde(default)]
    pub common_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDescription {
    #[serde(default)]
    pub value: Option<String>,
}

/// Fixed-shape identification record. Immutable once inserted into history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub name: String,
    pub probability: f64,
    pub url: Option<String>,
    pub edible_parts: Option<Vec<String>>,
    pub description: Option<String>,
    pub common_names: Option<Vec<String>>,
    pub is_plant: bool,
    pub uploaded_at: DateTime<Utc>,
}

/// Normalize a raw payload, stamping `uploaded_at` with the current time.
pub fn normalize(raw: &RawIdentification) -> NormalizedResult {
    normalize_at(raw, Utc::now())
}

/// Normalize a raw payload with an explicit timestamp (deterministic tests).
///
/// Only the first (highest-ranked) suggestion is used; a missing `is_plant`
/// block means "not a plant".
pub fn normalize_at(raw: &RawIdentification, now: DateTime<Utc>) -> NormalizedResult {
    let result = raw.result.as_ref();

    let is_plant = result
        .and_then(|r| r.is_plant.as_ref())
        .and_then(|p| p.binary)
        .unwrap_or(false);

    let suggestion = result
        .and_then(|r| r.classification.as_ref())
        .and_then(|c| c.suggestions.first());

    let name = suggestion
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| UNKNOWN_PLANT_NAME.to_string());
    let probability = suggestion.and_then(|s| s.probability).unwrap_or(0.0);

    let details = suggestion.and_then(|s| s.details.as_ref());
    let url = details.and_then(|d| d.url.clone());
    let edible_parts = details.and_then(|d| d.edible_parts.clone());
    let common_names = details.and_then(|d| d.common_names.clone());
    let description = details
        .and_then(|d| d.description.as_ref())
        .and_then(|d| d.value.as_deref())
        .map(truncate_description);

    NormalizedResult {
        name,
        probability,
        url,
        edible_parts,
        description,
        common_names,
        is_plant,
        uploaded_at: now,
    }
}

/// Cut a description to exactly [`DESCRIPTION_MAX_CHARS`] characters plus the
/// literal shortened suffix. Idempotent: an already-shortened value is
/// returned unchanged.
pub fn truncate_description(value: &str) -> String {
    if let Some(stripped) = value.strip_suffix(DESCRIPTION_SHORTENED_SUFFIX) {
        if stripped.chars().count() <= DESCRIPTION_MAX_CHARS {
            return value.to_string();
        }
    }

    if value.chars().count() <= DESCRIPTION_MAX_CHARS {
        return value.to_string();
    }

    let mut truncated: String = value.chars().take(DESCRIPTION_MAX_CHARS).collect();
    truncated.push_str(DESCRIPTION_SHORTENED_SUFFIX);
    truncated
}
