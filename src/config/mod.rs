//! Configuration management for newsdesk.
//!
//! Configuration is read from `~/.config/newsdesk/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::http_fetcher::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::fetcher::request::{DEFAULT_COUNTRY, DEFAULT_ENDPOINT};
use crate::fetcher::HeadlinesRequest;
use crate::images::DEFAULT_MAX_DIMENSION;

/// Environment variable consulted for the newsapi key.
pub const API_KEY_ENV: &str = "NEWSDESK_API_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub news: NewsConfig,
    pub images: ImagesConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
    pub logging: LoggingConfig,
}

/// Where headlines come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub endpoint: String,
    pub country: String,
    /// Prefer the `NEWSDESK_API_KEY` environment variable over storing the key here.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl NewsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub enabled: bool,
    /// Decoded thumbnails are shrunk to fit this many pixels per side.
    pub max_dimension: u32,
    pub timeout_secs: u64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dimension: DEFAULT_MAX_DIMENSION,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ImagesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file used while the TUI owns the terminal.
    pub file: Option<PathBuf>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub country: Option<String>,
    pub api_key: Option<String>,
}

impl Config {
    /// Load configuration from `config_path`.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/newsdesk/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsdesk").join("config.toml"))
    }

    /// Log file path: configured, else `<data dir>/newsdesk/newsdesk.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging.file.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join("newsdesk").join("newsdesk.log"))
        })
    }

    /// The headlines request after applying overrides.
    ///
    /// Key precedence: command line, then `NEWSDESK_API_KEY`, then the file.
    pub fn headlines_request(&self, overrides: &Overrides, env_key: Option<String>) -> HeadlinesRequest {
        let country = overrides
            .country
            .clone()
            .unwrap_or_else(|| self.news.country.clone());

        let api_key = [overrides.api_key.clone(), env_key, self.news.api_key.clone()]
            .into_iter()
            .flatten()
            .find(|key| !key.trim().is_empty());

        HeadlinesRequest::new(self.news.endpoint.clone(), country, api_key)
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# newsdesk configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB" / "#RGB").
#
# Keys: single characters ("a", "G"), special keys (Enter, Tab, Home, End,
# PageUp, PageDown, Up, Down, Esc, Space, F1-F12) and modifiers ("Ctrl+c").

[news]
endpoint = "https://newsapi.org/v2/top-headlines"
country = "us"
# Get a key at https://newsapi.org. Setting NEWSDESK_API_KEY in the
# environment is preferred over storing it here.
# api_key = ""
timeout_secs = 10

[images]
enabled = true
max_dimension = 96
timeout_secs = 10

[colors]
active_border = "Cyan"
inactive_border = "DarkGray"
selection_bg = "Cyan"
selection_fg = "Black"
title = "White"
description = "Gray"
byline = "Yellow"
placeholder = "DarkGray"
error = "LightRed"
notice_border = "Yellow"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
first = ["g", "Home"]
last = ["G", "End"]
open_article = ["Enter", "o"]
refresh = ["R"]
retry = ["r"]

[logging]
# file = "/tmp/newsdesk.log"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
