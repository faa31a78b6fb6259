//! Configuration file support for brokerdesk.
//!
//! Configuration is loaded from `~/.config/brokerdesk/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/brokerdesk/config.toml
//! data_file = "~/brokerdesk/catalog.json"
//! page_size = 20
//! latency_ms = 250
//! failing_pages = [4]
//!
//! [selector]
//! search_debounce_ms = 300
//! near_end_threshold = 2
//! load_more = true
//! cancel_policy = "revert"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::selector::{
    CancelPolicy, DEFAULT_NEAR_END_THRESHOLD, DEFAULT_SEARCH_DEBOUNCE_MS, SelectorConfig,
};
use crate::source::DEFAULT_PAGE_SIZE;

/// Environment variable naming the catalog file
pub const DATA_ENV: &str = "BROKERDESK_DATA";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// JSON catalog to load instead of the built-in seed
    pub data_file: Option<PathBuf>,

    /// Items per fetched page
    pub page_size: Option<usize>,

    /// Artificial latency added to every fetch
    pub latency_ms: Option<u64>,

    /// Page numbers the in-memory sources fail on
    pub failing_pages: Vec<u32>,

    /// Selector behaviour
    pub selector: SelectorSettings,
}

/// `[selector]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    pub search_debounce_ms: u64,
    pub near_end_threshold: u32,
    pub load_more: bool,
    pub cancel_policy: CancelPolicy,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            near_end_threshold: DEFAULT_NEAR_END_THRESHOLD,
            load_more: true,
            cancel_policy: CancelPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brokerdesk")
            .join("config.toml")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(
        mut self,
        data_file: Option<PathBuf>,
        page_size: Option<usize>,
        latency_ms: Option<u64>,
    ) -> Self {
        if data_file.is_some() {
            self.data_file = data_file;
        }
        if page_size.is_some() {
            self.page_size = page_size;
        }
        if latency_ms.is_some() {
            self.latency_ms = latency_ms;
        }
        self
    }

    /// Get the catalog file, falling back to the environment variable.
    ///
    /// `None` means the built-in seed catalog is used.
    pub fn data_file(&self) -> Option<PathBuf> {
        self.data_file
            .clone()
            .or_else(|| std::env::var(DATA_ENV).ok().map(PathBuf::from))
            .map(|path| expand_home(&path))
    }

    /// Page size, never zero.
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms.unwrap_or(0))
    }

    /// Selector configuration for a field labelled `label`.
    pub fn selector_config(&self, label: &str) -> SelectorConfig {
        SelectorConfig {
            label: label.to_string(),
            disabled: false,
            search_debounce_ms: self.selector.search_debounce_ms,
            near_end_threshold: self.selector.near_end_threshold,
            load_more: self.selector.load_more,
            cancel_policy: self.selector.cancel_policy,
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        Err(_) => path.to_path_buf(),
    }
}
