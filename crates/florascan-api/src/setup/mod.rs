//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod telemetry;

use crate::state::AppState;
use anyhow::{Context, Result};
use florascan_core::Config;
use florascan_services::{provider_from_config, ResultCache, SessionHistoryStore};
use florascan_storage::LocalStorage;
use std::sync::Arc;
use std::time::Duration;

/// Wire up storage, cache, history, and the identification provider, then
/// build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    let storage = Arc::new(
        LocalStorage::new(&config.upload_dir)
            .await
            .with_context(|| format!("Failed to initialize upload dir {}", config.upload_dir))?,
    );

    let cache = Arc::new(ResultCache::new(Duration::from_secs(config.cache_ttl_secs)));
    let history = Arc::new(SessionHistoryStore::new(
        storage.clone(),
        config.max_uploads_per_session,
    ));

    let provider =
        provider_from_config(&config).context("Failed to build identification provider")?;
    tracing::info!(provider = provider.name(), "Identification provider ready");

    let state = Arc::new(AppState {
        config,
        storage,
        cache,
        history,
        provider,
    });

    let router = routes::build_router(state.clone());

    Ok((state, router))
}
