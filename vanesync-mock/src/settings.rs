use serde::{Deserialize, Serialize};

use vanesync_bridge::configs::{CoverEntry, Logger};
use vanesync_bridge::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mock {
    /// Pause between scripted actions, on top of the rated travel time
    pub action_gap_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    #[serde(default)]
    pub cover: Vec<CoverEntry>,
    pub mock: Mock,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))?)
    }
}
