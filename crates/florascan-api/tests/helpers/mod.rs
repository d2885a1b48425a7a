//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p florascan-api`.

#![allow(dead_code)]

pub mod fixtures;
pub mod providers;
pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer, TestServerConfig};
use florascan_api::setup::routes;
use florascan_api::state::AppState;
use florascan_core::Config;
use florascan_services::{IdentificationProvider, ResultCache, SessionHistoryStore};
use florascan_storage::{LocalStorage, Storage};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Test application: server plus owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> &Path {
        Path::new(&self.state.config.upload_dir)
    }

    /// Count files currently sitting in the upload directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

fn test_config(upload_dir: &Path, max_uploads: u32, history_ttl_secs: u64) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        upload_dir: upload_dir.to_string_lossy().to_string(),
        demo_mode: true,
        plant_id_api_key: None,
        plant_id_api_url: "https://plant.id/api/v3/identification".to_string(),
        session_secret: "florascan-test-secret".to_string(),
        cache_ttl_secs: 3600,
        history_ttl_secs,
        max_uploads_per_session: max_uploads,
        max_file_size_bytes: 10 * 1024 * 1024,
        identify_timeout_secs: 5,
    }
}

async fn build_test_app(
    provider: Arc<dyn IdentificationProvider>,
    max_uploads: u32,
    history_ttl_secs: u64,
    wrap_storage: impl FnOnce(LocalStorage) -> Arc<dyn Storage>,
) -> TestApp {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config(temp_dir.path(), max_uploads, history_ttl_secs);

    let local = LocalStorage::new(temp_dir.path())
        .await
        .expect("local storage");
    let storage = wrap_storage(local);
    let cache = Arc::new(ResultCache::new(Duration::from_secs(config.cache_ttl_secs)));
    let history = Arc::new(SessionHistoryStore::new(
        storage.clone(),
        config.max_uploads_per_session,
    ));

    let state = Arc::new(AppState {
        config,
        storage,
        cache,
        history,
        provider,
    });

    let router = routes::build_router(state.clone());
    let server = TestServer::new_with_config(
        router,
        TestServerConfig {
            save_cookies: true,
            ..TestServerConfig::default()
        },
    )
    .expect("test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// Setup a test app with an injected identification provider. Cookies are
/// persisted across requests so each `TestServer` behaves like one browser
/// session.
pub async fn setup_test_app_with(
    provider: Arc<dyn IdentificationProvider>,
    max_uploads: u32,
) -> TestApp {
    build_test_app(provider, max_uploads, 3600, |local| {
        Arc::new(local) as Arc<dyn Storage>
    })
    .await
}

/// Setup a test app whose storage backend is wrapped by a test fake.
pub async fn setup_test_app_with_storage(
    provider: Arc<dyn IdentificationProvider>,
    wrap_storage: impl FnOnce(LocalStorage) -> Arc<dyn Storage>,
) -> TestApp {
    build_test_app(provider, 10, 3600, wrap_storage).await
}

/// Setup a test app with a custom history TTL (seconds).
pub async fn setup_test_app_with_history_ttl(
    provider: Arc<dyn IdentificationProvider>,
    history_ttl_secs: u64,
) -> TestApp {
    build_test_app(provider, 10, history_ttl_secs, |local| {
        Arc::new(local) as Arc<dyn Storage>
    })
    .await
}

/// Setup a test app with a deterministic always-a-plant provider.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(Arc::new(providers::FakePlantProvider::new()), 10).await
}

/// POST a file to `/upload` as the single multipart field `file`.
pub async fn upload_file(server: &TestServer, filename: &str, data: Vec<u8>) -> TestResponse {
    let part = Part::bytes(data).file_name(filename).mime_type("image/png");
    let form = MultipartForm::new().add_part("file", part);
    server.post("/upload").multipart(form).await
}

/// Extract the Location header of a redirect response.
pub fn redirect_target(response: &TestResponse) -> String {
    response
        .headers()
        .get("location")
        .expect("redirect should carry a Location header")
        .to_str()
        .expect("Location should be ASCII")
        .to_string()
}
