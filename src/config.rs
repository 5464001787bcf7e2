//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory and includes:
//! - The catalog API base URL and resource path names
//! - Page size and the size of the addressable universe
//! - Search debounce, request timeout and category retry timings
//!
//! Environment variables override the file, and CLI flags override both.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DexError, Result};

/// Environment variable that points at an alternate config file
pub const CONFIG_PATH_ENV: &str = "DEXVIEW_CONFIG";

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: usize = 12;
/// Highest identifier in the addressable universe (generations 1-7)
pub const DEFAULT_MAX_ID: u32 = 809;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog API, without a trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Path segment of the entity collection (`{base}/{entity_path}/{id}`)
    #[serde(default = "default_entity_path")]
    pub entity_path: String,

    /// Path segment of the category collection (`{base}/{category_path}/{name}`)
    #[serde(default = "default_category_path")]
    pub category_path: String,

    /// Cards per page, shared by remote and pool pagination
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Highest identifier loaded into the filterable universe
    #[serde(default = "default_max_id")]
    pub max_id: u32,

    /// Delay applied to search input before the pool is recomputed
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// How long a failed category lookup is served from cache before retrying
    #[serde(default = "default_category_retry_secs")]
    pub category_retry_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_entity_path() -> String {
    "pokemon".to_string()
}

fn default_category_path() -> String {
    "type".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_id() -> u32 {
    DEFAULT_MAX_ID
}

fn default_search_debounce_ms() -> u64 {
    200
}

fn default_request_timeout() -> u64 {
    30
}

fn default_category_retry_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            entity_path: default_entity_path(),
            category_path: default_category_path(),
            page_size: default_page_size(),
            max_id: default_max_id(),
            search_debounce_ms: default_search_debounce_ms(),
            request_timeout: default_request_timeout(),
            category_retry_secs: default_category_retry_secs(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    ///
    /// `DEXVIEW_CONFIG` wins when set; otherwise the platform config
    /// directory is used, falling back to the working directory.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }

        ProjectDirs::from("", "", "dexview")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("dexview.yaml"))
    }

    /// Load configuration from the default path, apply environment
    /// overrides and validate the result
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DexError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;

        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Apply `DEXVIEW_*` environment overrides on top of the loaded values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(base) = env::var("DEXVIEW_API_BASE_URL")
            && !base.is_empty()
        {
            self.api_base_url = base;
        }

        if let Ok(size) = env::var("DEXVIEW_PAGE_SIZE")
            && !size.is_empty()
        {
            self.page_size = size.parse().map_err(|_| {
                DexError::Config(format!("DEXVIEW_PAGE_SIZE must be a number, got '{size}'"))
            })?;
        }

        if let Ok(max_id) = env::var("DEXVIEW_MAX_ID")
            && !max_id.is_empty()
        {
            self.max_id = max_id.parse().map_err(|_| {
                DexError::Config(format!("DEXVIEW_MAX_ID must be a number, got '{max_id}'"))
            })?;
        }

        Ok(())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DexError::Config("page_size must be at least 1".to_string()));
        }
        if self.max_id == 0 {
            return Err(DexError::Config("max_id must be at least 1".to_string()));
        }
        if self.request_timeout == 0 {
            return Err(DexError::Config(
                "request_timeout must be at least 1 second".to_string(),
            ));
        }
        if self.entity_path.is_empty() || self.category_path.is_empty() {
            return Err(DexError::Config(
                "entity_path and category_path cannot be empty".to_string(),
            ));
        }
        self.base_url()?;
        Ok(())
    }

    /// Parsed API base URL, always ending in `/` so joins append segments
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.api_base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| DexError::InvalidUrl(self.api_base_url.clone(), e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(DexError::InvalidUrl(
                self.api_base_url.clone(),
                "URL cannot be used as a base".to_string(),
            ));
        }
        Ok(url)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn category_retry(&self) -> Duration {
        Duration::from_secs(self.category_retry_secs)
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
