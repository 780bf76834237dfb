//! Service configuration.
//!
//! Loaded once at startup from a TOML file. The raw file text passes
//! through `${VAR}` / `${VAR:-default}` substitution before parsing, and
//! a couple of environment overrides apply afterwards, so deployments can
//! keep credentials and paths out of the file entirely.

use janus_classifier::ClassifierConfig;
use janus_common::{expand_env_vars, JanusError, Result};
use janus_llm::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment override for the record store location.
const STORE_PATH_ENV: &str = "JANUS_STORE_PATH";

fn default_store_path() -> PathBuf {
    PathBuf::from("data/records.xml")
}

fn default_log_filter() -> String {
    "info".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Where the record store file lives.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Tracing filter directive (e.g. `info`, `debug,janus_store=trace`).
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            log_filter: default_log_filter(),
            classifier: ClassifierConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| JanusError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration text, applying env substitution first and env
    /// overrides after.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let expanded = expand_env_vars(raw);
        let mut config: Self = toml::from_str(&expanded)
            .map_err(|e| JanusError::Config(format!("parse config: {e}")))?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(STORE_PATH_ENV) {
            if !path.is_empty() {
                self.store_path = PathBuf::from(path);
            }
        }
    }
}
