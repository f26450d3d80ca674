//! Where the configuration comes from.
//!
//! Layers, lowest first: built-in defaults, the TOML file, environment
//! variables, command-line flags.

use super::{
    GestureConfig, MediaConfig, NavConfig, PageConfig, RubberConfig, TextFillConfig,
    TypewriterConfig,
};
use crate::model::Language;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Environment variable overriding the starting language.
pub const LANG_ENV: &str = "FOLIO_LANG";

/// Why a configuration could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file location is unusable.
    #[error("bad config path: {0}")]
    InvalidPath(String),

    /// The file exists but could not be read.
    #[error("cannot read {}: {reason}", path.display())]
    ReadError {
        /// File that was being read.
        path: PathBuf,
        /// I/O error text.
        reason: String,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("cannot parse {}: {reason}", path.display())]
    ParseError {
        /// File that was being parsed.
        path: PathBuf,
        /// Deserializer message.
        reason: String,
    },

    /// A value parsed but is out of range or inconsistent.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Dotted field name, e.g. `rubber.page`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Contents of `~/.config/folio/config.toml`. Every key is optional:
///
/// ```toml
/// language = "zh"
///
/// [pages]
/// count = 4
/// cooldown_ms = 300
///
/// [rubber]
/// damping_threshold = 3
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Starting language.
    #[serde(default)]
    pub language: Option<Language>,

    /// Where tracing output goes.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// `[gesture]` section.
    #[serde(default)]
    pub gesture: Option<GestureConfig>,

    /// `[text_fill]` section.
    #[serde(default)]
    pub text_fill: Option<TextFillConfig>,

    /// `[pages]` section.
    #[serde(default)]
    pub pages: Option<PageConfig>,

    /// `[rubber]` section.
    #[serde(default)]
    pub rubber: Option<RubberConfig>,

    /// `[typewriter]` section.
    #[serde(default)]
    pub typewriter: Option<TypewriterConfig>,

    /// `[media]` section.
    #[serde(default)]
    pub media: Option<MediaConfig>,
}

/// Configuration with every layer applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Engine tunables.
    pub nav: NavConfig,
    /// Starting language.
    pub language: Language,
    /// Where tracing output goes.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            language: Language::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Validate the engine section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nav.validate()
    }
}

/// `folio/folio.log` under the platform state directory
/// (`~/.local/state` on Linux), or `./folio.log` when there is none.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("folio").join("folio.log")
    } else {
        PathBuf::from("folio.log")
    }
}

/// Read one config file. A missing file yields `Ok(None)`.
///
/// # Errors
///
/// [`ConfigError::ReadError`] or [`ConfigError::ParseError`] for a file that
/// exists but is unusable.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(Some(config))
}

/// `folio/config.toml` under the platform config directory, if there is one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
}

/// Pick the config file and read it.
///
/// `--config` wins over `FOLIO_CONFIG`, which wins over the default path.
/// Only the chosen file is read.
///
/// # Errors
///
/// An empty `FOLIO_CONFIG`, or a chosen file that cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Lay the file over the defaults.
///
/// Absent sections take their defaults; present sections fill their own
/// missing fields with defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();
    let Some(file) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        nav: NavConfig {
            gesture: file.gesture.unwrap_or_default(),
            text_fill: file.text_fill.unwrap_or_default(),
            pages: file.pages.unwrap_or_default(),
            rubber: file.rubber.unwrap_or_default(),
            typewriter: file.typewriter.unwrap_or_default(),
            media: file.media.unwrap_or_default(),
        },
        language: file.language.unwrap_or(defaults.language),
        log_file_path: file.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply `FOLIO_LANG`. An unrecognized value is logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var(LANG_ENV) {
        match value.parse::<Language>() {
            Ok(lang) => config.language = lang,
            Err(e) => tracing::warn!(error = %e, "ignoring {LANG_ENV}"),
        }
    }

    config
}

/// Flags the user set on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--lang`
    pub language: Option<Language>,
    /// `--pages`
    pub pages: Option<usize>,
    /// `--log-file`
    pub log_file: Option<PathBuf>,
}

/// Apply command-line flags, the last layer.
///
/// Shrinking the page count drops overlay bindings and the rubber stage
/// that would point past the last page.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(lang) = cli.language {
        config.language = lang;
    }

    if let Some(count) = cli.pages {
        config.nav.pages.count = count;
        config.nav.pages.overlays.retain(|b| b.page < count);
        if config.nav.rubber.enabled && config.nav.rubber.page >= count {
            tracing::debug!(
                page = config.nav.rubber.page,
                count,
                "rubber page beyond --pages, disabling stage"
            );
            config.nav.rubber.enabled = false;
        }
    }

    if let Some(path) = cli.log_file {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
