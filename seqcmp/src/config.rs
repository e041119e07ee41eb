//! User configuration loaded from `config.toml`.
//!
//! Every key is optional. A missing file yields the defaults; a malformed file is
//! reported as a [`ConfigError`] and the caller decides whether to continue.

use std::path::{Path, PathBuf};

use seqcmp_core::DisplayMode;
use serde::Deserialize;

/// Errors raised while reading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings read from `$XDG_CONFIG_HOME/seqcmp/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme name passed to [`crate::theme::Theme::from_name`].
    pub theme: String,
    /// Start with selection sync on.
    pub selection_sync: bool,
    /// Start with scroll sync on.
    pub scroll_sync: bool,
    /// Initial display mode (`"request"` or `"response"`).
    pub display_mode: DisplayMode,
    /// Where tracing output goes. No file means logs are discarded; the terminal
    /// belongs to the UI.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            selection_sync: true,
            scroll_sync: false,
            display_mode: DisplayMode::Request,
            log_file: None,
        }
    }
}

/// Returns the path to the seqcmp config file.
///
/// Prefers `$XDG_CONFIG_HOME/seqcmp/config.toml`; falls back to
/// `~/.config/seqcmp/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("seqcmp").join("config.toml")
}

/// Reads and parses the config at `path`. A file that does not exist is not an
/// error and gives [`Config::default`].
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => return Err(ConfigError::Read { path: path.to_owned(), source }),
    };
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
}
