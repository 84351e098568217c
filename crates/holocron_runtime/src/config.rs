//! Runtime configuration, loaded from TOML.
//!
//! ```toml
//! data_path = "data/swapi.json"
//! log_filter = "holocron=debug"
//! pretty = true
//! history_size = 500
//!
//! [engine]
//! max_depth = 8
//! memoize = true
//! ```
//!
//! Every key is optional. Without `data_path` or `snapshot_path` the
//! bundled seed is loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use holocron_engine::EngineConfig;
use holocron_foundation::{Error, ErrorKind, Result};

/// Configuration for the CLI and REPL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// JSON seed document to load instead of the bundled one.
    pub data_path: Option<PathBuf>,

    /// `MessagePack` snapshot to load; takes precedence over `data_path`.
    pub snapshot_path: Option<PathBuf>,

    /// `tracing` filter directive used when `HOLOCRON_LOG` is unset.
    pub log_filter: String,

    /// Pretty-print JSON results.
    pub pretty: bool,

    /// Number of REPL history entries kept.
    pub history_size: usize,

    /// Query limits.
    pub engine: EngineConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            snapshot_path: None,
            log_filter: "warn".to_string(),
            pretty: false,
            history_size: 1000,
            engine: EngineConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid TOML or has keys of
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::new(ErrorKind::ConfigError(e.to_string())))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, or `ConfigError` if it
    /// cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to read config '{}': {e}",
                path.as_ref().display()
            )))
        })?;
        Self::from_toml_str(&text)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::new(ErrorKind::ConfigError(e.to_string())))
    }

    /// Builder method to set the seed path.
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Builder method to set the snapshot path.
    #[must_use]
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Builder method to toggle pretty output.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
