//! Configuration module
//!
//! Environment-driven configuration for the service. Demo mode swaps the
//! external identification client for the synthetic generator and shortens
//! the result-cache TTL so cached entries roll over quickly during demos.

use std::env;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_UPLOAD_DIR: &str = "data/uploads";
const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_MAX_UPLOADS_PER_SESSION: u32 = 10;
const DEFAULT_IDENTIFY_TIMEOUT_SECS: u64 = 30;

const CACHE_TTL_SECS: u64 = 86_400;
const CACHE_TTL_SECS_DEMO: u64 = 300;
const HISTORY_TTL_SECS: u64 = 3_600;
const HISTORY_TTL_SECS_DEMO: u64 = 300;

const DEV_SESSION_SECRET: &str = "florascan-dev-secret";

/// Application configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// Directory where uploaded images are stored; created at startup.
    pub upload_dir: String,
    /// Demo mode: synthetic identification provider, short cache TTL.
    pub demo_mode: bool,
    pub plant_id_api_key: Option<String>,
    pub plant_id_api_url: String,
    /// Secret for signing the session cookie.
    pub session_secret: String,
    pub cache_ttl_secs: u64,
    pub history_ttl_secs: u64,
    pub max_uploads_per_session: u32,
    pub max_file_size_bytes: usize,
    pub identify_timeout_secs: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let demo_mode = env_bool("DEMO_MODE", false);

        let cache_ttl_default = if demo_mode {
            CACHE_TTL_SECS_DEMO
        } else {
            CACHE_TTL_SECS
        };
        let history_ttl_default = if demo_mode {
            HISTORY_TTL_SECS_DEMO
        } else {
            HISTORY_TTL_SECS
        };

        let config = Config {
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            demo_mode,
            plant_id_api_key: env::var("PLANT_ID_API_KEY").ok().filter(|k| !k.is_empty()),
            plant_id_api_url: env::var("PLANT_ID_API_URL")
                .unwrap_or_else(|_| "https://plant.id/api/v3/identification".to_string()),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| DEV_SESSION_SECRET.to_string()),
            cache_ttl_secs: env_or("CACHE_TTL_SECS", cache_ttl_default),
            history_ttl_secs: env_or("HISTORY_TTL_SECS", history_ttl_default),
            max_uploads_per_session: env_or(
                "MAX_UPLOADS_PER_SESSION",
                DEFAULT_MAX_UPLOADS_PER_SESSION,
            ),
            max_file_size_bytes: env_or("MAX_FILE_SIZE_BYTES", DEFAULT_MAX_FILE_SIZE_BYTES),
            identify_timeout_secs: env_or("IDENTIFY_TIMEOUT_SECS", DEFAULT_IDENTIFY_TIMEOUT_SECS),
        };

        Ok(config)
    }

    /// Check required settings. Demo mode relaxes the API key and secret
    /// requirements so the service can run fully offline.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.demo_mode && self.plant_id_api_key.is_none() {
            anyhow::bail!("PLANT_ID_API_KEY is required unless DEMO_MODE is enabled");
        }
        if self.is_production() && self.session_secret == DEV_SESSION_SECRET {
            anyhow::bail!("SESSION_SECRET must be set in production");
        }
        if self.max_uploads_per_session == 0 {
            anyhow::bail!("MAX_UPLOADS_PER_SESSION must be at least 1");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
