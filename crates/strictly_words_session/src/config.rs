//! Session layer configuration, read from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_words::GameConfig;
use tracing::{debug, info, instrument, warn};

/// Configuration for the session layer.
///
/// ```toml
/// dictionary_dir = "dictionaries"
/// default_dictionary = "fr"
/// max_sessions = 64
///
/// [game]
/// max_consecutive_passes = 6
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory scanned for dictionary files at startup.
    #[serde(default = "default_dictionary_dir")]
    dictionary_dir: PathBuf,

    /// Dictionary used when a session does not name one.
    #[serde(default = "default_dictionary")]
    default_dictionary: String,

    /// Sessions allowed at once.
    #[serde(default = "default_max_sessions")]
    max_sessions: usize,

    /// Rules for new games.
    #[serde(default)]
    game: GameConfig,
}

#[instrument]
fn default_dictionary_dir() -> PathBuf {
    PathBuf::from("dictionaries")
}

#[instrument]
fn default_dictionary() -> String {
    "fr".to_string()
}

#[instrument]
fn default_max_sessions() -> usize {
    64
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dictionary_dir: default_dictionary_dir(),
            default_dictionary: default_dictionary(),
            max_sessions: default_max_sessions(),
            game: GameConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(
            dictionary_dir = %config.dictionary_dir.display(),
            default_dictionary = %config.default_dictionary,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Same settings with another dictionary directory.
    pub fn with_dictionary_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dictionary_dir = dir.into();
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
