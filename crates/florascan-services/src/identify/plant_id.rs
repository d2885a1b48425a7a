//! Real identification client
//!
//! POSTs the image to the external identification API as base64 JSON with an
//! `Api-Key` header and a `details` query parameter naming the nested
//! attributes we consume. The call is bounded by the configured timeout;
//! timeouts and non-2xx responses surface as distinct error variants and are
//! never retried automatically.

use async_trait::async_trait;
use base64::Engine;
use florascan_core::models::RawIdentification;
use florascan_core::AppError;
use serde_json::json;
use std::time::Duration;

use super::IdentificationProvider;

/// Nested detail fields requested from the API.
const DETAIL_FIELDS: &str = "common_names,url,description,edible_parts";

pub struct PlantIdProvider {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl PlantIdProvider {
    pub fn new(api_url: String, api_key: String, timeout_secs: u64) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to create identification HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            api_url,
            api_key,
            timeout_secs,
        })
    }
}

#[async_trait]
impl IdentificationProvider for PlantIdProvider {
    #[tracing::instrument(skip(self, image), fields(image_bytes = image.len()))]
    async fn identify(&self, image: &[u8]) -> Result<RawIdentification, AppError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let body = json!({ "images": [encoded] });

        let response = self
            .http_client
            .post(&self.api_url)
            .query(&[("details", DETAIL_FIELDS)])
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(timeout_secs = self.timeout_secs, "Identification call timed out");
                    AppError::Timeout(self.timeout_secs)
                } else {
                    AppError::ExternalService {
                        status: 0,
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                "Identification service returned an error"
            );
            return Err(AppError::ExternalService {
                status: status.as_u16(),
                message,
            });
        }

        let raw: RawIdentification = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else {
                AppError::ExternalService {
                    status: status.as_u16(),
                    message: format!("Unreadable response body: {}", e),
                }
            }
        })?;

        tracing::debug!("Identification call succeeded");
        Ok(raw)
    }

    fn name(&self) -> &'static str {
        "plant-id"
    }
}
