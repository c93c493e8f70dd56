//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Messages;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Client-side search throttling
    #[serde(default)]
    pub search: SearchConfig,

    /// Task monitor polling
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Recent-saves history
    #[serde(default)]
    pub history: HistoryConfig,

    /// About screen settings
    #[serde(default)]
    pub about: AboutConfig,

    /// User-facing message templates
    #[serde(default)]
    pub messages: Messages,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| AppError::config(format!("api.base_url is invalid: {e}")))?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::config("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::config("api.timeout_secs must be > 0"));
        }
        if self.api.max_concurrent == 0 {
            return Err(AppError::config("api.max_concurrent must be > 0"));
        }
        if self.search.max_requests == 0 {
            return Err(AppError::config("search.max_requests must be > 0"));
        }
        if self.search.window_ms == 0 {
            return Err(AppError::config("search.window_ms must be > 0"));
        }
        if self.monitor.poll_interval_secs == 0 {
            return Err(AppError::config(
                "monitor.poll_interval_secs must be > 0",
            ));
        }
        if self.history.capacity == 0 {
            return Err(AppError::config("history.capacity must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client settings for the archive backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend service
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent save requests in a batch
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Sliding-window limit on search submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Submissions allowed inside one window
    #[serde(default = "defaults::max_requests")]
    pub max_requests: usize,

    /// Window length in milliseconds
    #[serde(default = "defaults::window_ms")]
    pub window_ms: u64,

    /// Cooldown shown after a rejection, in seconds
    #[serde(default = "defaults::cooldown_secs")]
    pub cooldown_secs: u32,

    /// Results per search page
    #[serde(default = "defaults::page_limit")]
    pub page_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_requests: defaults::max_requests(),
            window_ms: defaults::window_ms(),
            cooldown_secs: defaults::cooldown_secs(),
            page_limit: defaults::page_limit(),
        }
    }
}

/// Task monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between automatic refreshes
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_secs: u64,

    /// Page requested from the task list
    #[serde(default = "defaults::monitor_page")]
    pub page: u32,

    /// Tasks requested per refresh
    #[serde(default = "defaults::monitor_limit")]
    pub limit: u32,

    /// Start polling immediately
    #[serde(default = "defaults::auto_refresh")]
    pub auto_refresh: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: defaults::poll_interval(),
            page: defaults::monitor_page(),
            limit: defaults::monitor_limit(),
            auto_refresh: defaults::auto_refresh(),
        }
    }
}

/// Recent-saves history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "defaults::history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::history_capacity(),
        }
    }
}

/// About screen settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutConfig {
    /// Location of the generated `build-info.json`
    #[serde(default = "defaults::build_info_path")]
    pub build_info_path: String,

    /// Donation link, hidden until revealed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_url: Option<String>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            build_info_path: defaults::build_info_path(),
            donation_url: None,
        }
    }
}

mod defaults {
    // Api defaults
    pub fn base_url() -> String {
        "http://localhost:3001".into()
    }
    pub fn user_agent() -> String {
        concat!("saver/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        3
    }

    // Search defaults
    pub fn max_requests() -> usize {
        10
    }
    pub fn window_ms() -> u64 {
        10_000
    }
    pub fn cooldown_secs() -> u32 {
        15
    }
    pub fn page_limit() -> u32 {
        20
    }

    // Monitor defaults
    pub fn poll_interval() -> u64 {
        5
    }
    pub fn monitor_page() -> u32 {
        1
    }
    pub fn monitor_limit() -> u32 {
        50
    }
    pub fn auto_refresh() -> bool {
        true
    }

    pub fn history_capacity() -> usize {
        10
    }

    pub fn build_info_path() -> String {
        "public/build-info.json".into()
    }
}
