//! Identification providers
//!
//! A provider takes raw image bytes and returns the external API's raw
//! payload. The real provider calls the Plant.id-style HTTP API; the demo
//! provider synthesizes structurally identical payloads so the rest of the
//! pipeline runs without network access or an API key.

pub mod demo;
pub mod plant_id;

use std::sync::Arc;

use async_trait::async_trait;
use florascan_core::models::RawIdentification;
use florascan_core::{AppError, Config};

pub use demo::DemoProvider;
pub use plant_id::PlantIdProvider;

#[async_trait]
pub trait IdentificationProvider: Send + Sync {
    /// Identify the plant in `image`. Fails with `AppError::Timeout` when the
    /// bounded call duration elapses and `AppError::ExternalService` on
    /// non-success status codes.
    async fn identify(&self, image: &[u8]) -> Result<RawIdentification, AppError>;

    /// Short provider name for logging.
    fn name(&self) -> &'static str;
}

/// Build the provider selected by configuration: the synthetic generator in
/// demo mode, otherwise the real HTTP client.
pub fn provider_from_config(
    config: &Config,
) -> Result<Arc<dyn IdentificationProvider>, AppError> {
    if config.demo_mode {
        tracing::info!("Demo mode enabled: using synthetic identification provider");
        return Ok(Arc::new(DemoProvider::new()));
    }

    let api_key = config.plant_id_api_key.clone().ok_or_else(|| {
        AppError::Internal("PLANT_ID_API_KEY missing outside demo mode".to_string())
    })?;

    let provider = PlantIdProvider::new(
        config.plant_id_api_url.clone(),
        api_key,
        config.identify_timeout_secs,
    )?;
    Ok(Arc::new(provider))
}
