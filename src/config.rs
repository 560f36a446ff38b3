use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::rounding::RoundingMode;

/// Directory name under the platform config root.
pub const APP_NAME: &str = "praxibill";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown rounding mode: {0:?}")]
    UnknownRoundingMode(String),
}

/// On-disk shape of the config file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    rounding_mode: Option<String>,
    site: String,
}

/// Process-wide billing configuration, read once at startup.
///
/// `site` is the practice-location tag stamped onto new patients,
/// consultations and bills whose `site` field is unset.
#[derive(Debug, Clone)]
pub struct BillingConfig {
    pub rounding_mode: RoundingMode,
    pub site: String,
}

impl BillingConfig {
    pub fn new(rounding_mode: RoundingMode, site: impl Into<String>) -> Self {
        Self {
            rounding_mode,
            site: site.into(),
        }
    }

    /// Load and validate the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let rounding_mode = RoundingMode::parse(raw.rounding_mode.as_deref())?;
        tracing::info!(site = %raw.site, ?rounding_mode, "configuration loaded");
        Ok(Self {
            rounding_mode,
            site: raw.site,
        })
    }
}

/// Default location of the config file (~/.config/praxibill/config.json
/// or the platform equivalent).
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().expect("Cannot determine config directory");
    base.join(APP_NAME).join("config.json")
}
