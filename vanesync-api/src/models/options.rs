use std::time::Duration;

use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

/// Default rated open travel time in seconds.
pub const DEF_OPEN_SECONDS: f32 = 12.0;
/// Default rated close travel time in seconds.
pub const DEF_CLOSE_SECONDS: f32 = 15.0;
/// Default pause between repeated transmissions in milliseconds.
pub const DEF_SIGNAL_REPETITIONS_DELAY_MS: u64 = 200;

/// Per-cover option slots. Every slot carries a documented default except
/// `signal_repetitions`, which must be present for construction to succeed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverOptions {
    /// Rated open travel time in seconds
    #[serde(default = "default_open_seconds", deserialize_with = "travel_seconds")]
    pub open_seconds: f32,
    /// Rated close travel time in seconds
    #[serde(default = "default_close_seconds", deserialize_with = "travel_seconds")]
    pub close_seconds: f32,
    /// Serve device-specific icon artwork
    #[serde(default)]
    pub custom_icon: bool,
    /// Use the coloured icon set while the cover is not closed
    #[serde(default)]
    pub colour_icon: bool,
    /// Classify partially tilted positions as closed
    #[serde(default)]
    pub partial_closed: bool,
    /// Number of on-air transmissions per command
    pub signal_repetitions: u8,
    /// Pause between repeated transmissions in milliseconds
    #[serde(default = "default_signal_repetitions_delay_ms")]
    pub signal_repetitions_delay_ms: u64,
}

fn default_open_seconds() -> f32 {
    DEF_OPEN_SECONDS
}

fn default_close_seconds() -> f32 {
    DEF_CLOSE_SECONDS
}

fn default_signal_repetitions_delay_ms() -> u64 {
    DEF_SIGNAL_REPETITIONS_DELAY_MS
}

/// Travel times must be representable as a `Duration`.
fn travel_seconds<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = f32::deserialize(deserializer)?;

    if Duration::try_from_secs_f32(seconds).is_err() {
        return Err(Error::invalid_value(
            Unexpected::Float(f64::from(seconds)),
            &"a finite, non-negative number of seconds",
        ));
    }

    Ok(seconds)
}
