//! Application state
//!
//! The cache, history, storage, and identification provider are explicitly
//! injected services held here, never module-level singletons, so tests can
//! swap any of them (notably the provider) for a deterministic fake.

use florascan_core::Config;
use florascan_services::{IdentificationProvider, ResultCache, SessionHistoryStore};
use florascan_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<ResultCache>,
    pub history: Arc<SessionHistoryStore>,
    pub provider: Arc<dyn IdentificationProvider>,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
