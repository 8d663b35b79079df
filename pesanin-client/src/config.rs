//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientError;

/// Environment variable names
pub mod env {
    pub const API_URL: &str = "PESANIN_API_URL";
    pub const TIMEOUT_SECS: &str = "PESANIN_TIMEOUT_SECS";
    pub const DATA_DIR: &str = "PESANIN_DATA_DIR";
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DATA_DIR: &str = ".pesanin";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/60?text=Menu";

/// Client configuration for connecting to the Pesanin API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory of the file storage backend
    pub data_dir: PathBuf,

    /// Pause between a successful table scan and the jump to the menu
    pub scan_redirect_delay: Duration,

    /// Refresh period of a single order's status
    pub order_status_interval: Duration,

    /// Refresh period of order lists
    pub order_list_interval: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            scan_redirect_delay: Duration::from_millis(1500),
            order_status_interval: Duration::from_secs(5),
            order_list_interval: Duration::from_secs(10),
        }
    }

    /// Build from the process environment, after loading `.env` if present
    pub fn from_env() -> Result<Self, ClientError> {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            std::env::var(env::API_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        );

        if let Ok(raw) = std::env::var(env::TIMEOUT_SECS) {
            let seconds = raw.parse::<u64>().map_err(|e| {
                ClientError::Config(format!("{} must be a number of seconds: {e}", env::TIMEOUT_SECS))
            })?;
            config = config.with_timeout(seconds);
        }

        if let Ok(dir) = std::env::var(env::DATA_DIR) {
            config = config.with_data_dir(dir);
        }

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the storage directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_scan_redirect_delay(mut self, delay: Duration) -> Self {
        self.scan_redirect_delay = delay;
        self
    }

    pub fn with_poll_intervals(mut self, order_status: Duration, order_list: Duration) -> Self {
        self.order_status_interval = order_status;
        self.order_list_interval = order_list;
        self
    }

    /// Absolute URL of an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolve a menu image reference for display.
    ///
    /// Empty -> placeholder, absolute URL -> as is, relative -> served by the API host.
    pub fn image_url(&self, url: &str) -> String {
        if url.is_empty() {
            PLACEHOLDER_IMAGE_URL.to_string()
        } else if url.starts_with("http") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url, url)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
