use std::{env, fs};

use serde::{Deserialize, Serialize};

use vanesync_api::models::{CoverOptions, DeviceInfo};

use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

/// One configured cover: radio identity plus its option slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverEntry {
    pub device_id: String,
    pub name: String,
    #[serde(flatten)]
    pub options: CoverOptions,
}

impl CoverEntry {
    pub fn device(&self) -> DeviceInfo {
        DeviceInfo::new(&self.device_id, &self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    #[serde(default)]
    pub cover: Vec<CoverEntry>,
}

impl Settings {
    /// Loads settings from `VANESYNC_CONFIG`, falling back to the bundled
    /// default path.
    pub fn new() -> Result<Self, ConfigError> {
        let path =
            env::var("VANESYNC_CONFIG").unwrap_or_else(|_| "configs/default.toml".to_string());

        Self::from_toml(&fs::read_to_string(path)?)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}
