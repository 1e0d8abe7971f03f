use std::path::PathBuf;
use std::time::Duration;

/// Waste service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WasteConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL` (required).
    pub database_url: String,
    /// TCP port for the HTTP server (default 3310). Env var: `WASTE_PORT`.
    pub waste_port: u16,
    /// Directory for stored uploads (default `uploads`). Env var: `UPLOAD_DIR`.
    pub upload_dir: PathBuf,
    /// API key for the external classifier. Env var: `GEMINI_API_KEY` (required).
    pub gemini_api_key: String,
    /// Classifier model name (default `gemini-2.5-flash`). Env var: `GEMINI_MODEL`.
    pub gemini_model: String,
    /// Maximum in-flight classifier calls (default 4).
    /// Env var: `MAX_CONCURRENT_CLASSIFICATIONS`.
    pub max_concurrent_classifications: usize,
    /// Per-call classifier timeout in seconds (default 60).
    /// Env var: `CLASSIFY_TIMEOUT_SECS`.
    pub classify_timeout: Duration,
    /// Attempts per image including the first call (default 2, i.e. one retry).
    /// Env var: `CLASSIFY_MAX_ATTEMPTS`.
    pub classify_max_attempts: u32,
    /// Age in seconds after which a `Processing` image is reclaimed as
    /// `Failed` (default 300). Env var: `STALE_PROCESSING_SECS`.
    pub stale_processing: chrono::Duration,
    /// Reclaim sweep interval in seconds (default 60).
    /// Env var: `RECLAIM_INTERVAL_SECS`.
    pub reclaim_interval: Duration,
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

impl WasteConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            waste_port: env_parsed("WASTE_PORT").unwrap_or(3310),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            gemini_api_key: std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_owned()),
            max_concurrent_classifications: env_parsed("MAX_CONCURRENT_CLASSIFICATIONS")
                .unwrap_or(4),
            classify_timeout: Duration::from_secs(
                env_parsed("CLASSIFY_TIMEOUT_SECS").unwrap_or(60),
            ),
            classify_max_attempts: env_parsed("CLASSIFY_MAX_ATTEMPTS").unwrap_or(2),
            stale_processing: chrono::Duration::seconds(
                env_parsed("STALE_PROCESSING_SECS").unwrap_or(300),
            ),
            reclaim_interval: Duration::from_secs(env_parsed("RECLAIM_INTERVAL_SECS").unwrap_or(60)),
        }
    }
}
