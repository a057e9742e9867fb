//! Optional RON configuration for the desktop shell.
//!
//! Looked up at `$ANONYKEYS_CONFIG`, then `./anonykeys.ron`. Every field has a
//! default, so a file only needs the settings it changes:
//!
//! ```ron
//! (
//!     language: "ar",
//!     close_transition_ms: 0,
//!     fetch: (request_timeout_secs: 10),
//!     font_paths: ["/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf"],
//! )
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anonykeys_core::{Language, StateOptions, DEFAULT_CLOSE_TRANSITION};
use anonykeys_engine::FetchSettings;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_ENV_VAR: &str = "ANONYKEYS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "./anonykeys.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("unknown language {0:?} (expected en, ru or ar)")]
    UnknownLanguage(String),
    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language tag the shell starts in.
    pub language: String,
    /// Delay between the close click and the frame being torn down. Zero closes at once.
    pub close_transition_ms: u64,
    pub window: WindowConfig,
    pub fetch: FetchConfig,
    pub log_destination: LogDestination,
    pub log_level: String,
    /// Extra fonts tried before egui's bundled ones, e.g. for Arabic glyphs.
    pub font_paths: Vec<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::default().tag().to_string(),
            close_transition_ms: DEFAULT_CLOSE_TRANSITION.as_millis() as u64,
            window: WindowConfig::default(),
            fetch: FetchConfig::default(),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            font_paths: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "AnonyKeys".to_string(),
            width: 1100.0,
            height: 760.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            redirect_limit: defaults.redirect_limit,
            max_bytes: defaults.max_bytes,
        }
    }
}

impl AppConfig {
    pub fn state_options(&self) -> StateOptions {
        StateOptions {
            language: Language::from_tag(&self.language).unwrap_or_default(),
            close_transition: Duration::from_millis(self.close_transition_ms),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            redirect_limit: self.fetch.redirect_limit,
            max_bytes: self.fetch.max_bytes,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        shell_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if Language::from_tag(&self.language).is_none() {
            return Err(ConfigError::UnknownLanguage(self.language));
        }
        if shell_logging::parse_level(&self.log_level).is_none() {
            return Err(ConfigError::UnknownLogLevel(self.log_level));
        }
        Ok(self)
    }
}

/// The config file to read, if any: the env var wins even when the file is missing.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.exists().then_some(fallback)
}

pub fn load() -> Result<AppConfig, ConfigError> {
    match config_path() {
        Some(path) => load_from(&path),
        None => Ok(AppConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = ron::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()
}
