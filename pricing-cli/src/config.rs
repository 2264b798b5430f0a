//! Calculator configuration loaded from TOML.
//!
//! ```toml
//! currency = "pyg"
//! log_level = "debug"
//!
//! [defaults]
//! cfun = "9.000,00"
//! cmvun = "5.000,00"
//! ocv = "10%"
//! profit_ratio = "15%"
//! sale_price = "20.000,00"
//! discount = "5%"
//! ```
//!
//! Every key is optional; missing keys keep their built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use pricing_core::{Currency, RawInputs};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pricing.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Currency used to label amounts.
    pub currency: Currency,

    /// Log filter applied when `RUST_LOG` is not set.
    pub log_level: String,

    /// Field text pre-filled into the form.
    pub defaults: RawInputs,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            log_level: "info".to_string(),
            defaults: RawInputs::default(),
        }
    }
}

impl CalculatorConfig {
    /// Parses configuration text. `origin` is only used in error messages.
    pub fn from_toml_str(
        text: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is read if present and built-in defaults are
    /// used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&text, &path)
    }
}
