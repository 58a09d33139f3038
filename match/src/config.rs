use crate::error::ConfigError;
use log::warn;
use once_cell::sync::OnceCell;
use serde_derive::Deserialize;
use std::path::Path;
use std::sync::Mutex;

static INSTANCE: OnceCell<Mutex<RuntimeConfig>> = OnceCell::new();

pub fn instance() -> &'static Mutex<RuntimeConfig> {
    INSTANCE.get_or_init(|| Mutex::new(RuntimeConfig::new()))
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Listen address of the matching API
    pub addr: String,
    /// Listen address of the Prometheus endpoint
    pub metrics_addr: String,
    /// Largest participant list a single request may carry
    pub max_participants: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        RuntimeConfig {
            addr: "0.0.0.0:4000".to_string(),
            metrics_addr: "0.0.0.0:4010".to_string(),
            max_participants: 10_000,
        }
    }

    /// Reads and parses a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads `path` into the process-wide instance, falling back to defaults
    /// when the file is missing or malformed
    pub fn from_toml(path: impl AsRef<Path>) -> Self {
        let config = match Self::load(path.as_ref()) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "Something went wrong reading the runtime config file {}, {}",
                    path.as_ref().display(),
                    e
                );
                RuntimeConfig::new()
            }
        };
        match instance().lock() {
            Ok(mut current) => current.clone_from(&config),
            Err(poisoned) => poisoned.into_inner().clone_from(&config),
        }
        config
    }
}
