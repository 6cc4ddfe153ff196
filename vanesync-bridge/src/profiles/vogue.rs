use std::time::Duration;

use vanesync_api::models::CoverOptions;

use crate::cover::Motion;

use super::{BlindProfile, CoverCapabilities, TiltTimings};

/// Full counter-clockwise close, tilt step 0.
pub const CMD_CLOSE_CCW: u8 = 0x00;
/// Full clockwise close, tilt steps past the last louvre angle.
pub const CMD_CLOSE_CW: u8 = 0x01;
pub const CMD_TILT_45: u8 = 0x02;
pub const CMD_TILT_90: u8 = 0x03;
pub const CMD_TILT_135: u8 = 0x04;

const TYPE_LABEL: &str = "Vogue Vertical";
const ICON_ROOT: &str = "/local/vanesync/vertical";

/// Two steps from fully closed to the 90-degree mid point.
const MID_STEPS: u8 = 2;
const STEP_MS: u64 = 2000;

/// Louvolite Vogue vertical blind: five louvre rotations driven by
/// single-byte opcodes, no lift, no position feedback.
pub struct LouvoliteVogue {
    timings: TiltTimings,
    custom_icon: bool,
    colour_icon: bool,
    partial_closed: bool,
}

impl LouvoliteVogue {
    pub fn new(options: &CoverOptions) -> Self {
        // Whichever configured leg is faster is the opening one.
        let open = Duration::from_secs_f32(options.open_seconds.min(options.close_seconds));
        let close = Duration::from_secs_f32(options.open_seconds.max(options.close_seconds));

        Self {
            timings: TiltTimings {
                open,
                close,
                step: Duration::from_millis(STEP_MS),
                sync: close,
            },
            custom_icon: options.custom_icon,
            colour_icon: options.colour_icon,
            partial_closed: options.partial_closed,
        }
    }
}

impl BlindProfile for LouvoliteVogue {
    fn type_label(&self) -> &'static str {
        TYPE_LABEL
    }

    fn mid_steps(&self) -> u8 {
        MID_STEPS
    }

    fn capabilities(&self) -> CoverCapabilities {
        CoverCapabilities {
            supports_mid_point: true,
            supports_lift: false,
            lift_on_open: false,
            sync_on_mid_point: false,
        }
    }

    fn timings(&self) -> &TiltTimings {
        &self.timings
    }

    fn target_command(&self, target: u8) -> (Motion, u8) {
        match target {
            0 => (Motion::Closing, CMD_CLOSE_CCW),
            1 => (Motion::Opening, CMD_TILT_45),
            2 => (Motion::Opening, CMD_TILT_90),
            3 => (Motion::Opening, CMD_TILT_135),
            _ => (Motion::Closing, CMD_CLOSE_CW),
        }
    }

    fn close_command(&self) -> u8 {
        CMD_CLOSE_CCW
    }

    /// Open means rotated to 90 degrees on this device, the same command the
    /// mid tilt issues.
    fn open_command(&self) -> u8 {
        CMD_TILT_90
    }

    fn mid_command(&self) -> u8 {
        CMD_TILT_90
    }

    /// Short moves ride the faster opening travel profile, longer ones the
    /// slower full-close profile.
    fn travel_time(&self, steps: u8) -> Duration {
        if steps <= 2 {
            self.timings.open
        } else {
            self.timings.close
        }
    }

    fn entity_picture(
        &self,
        motion: Motion,
        tilt_percent: u8,
        last_closed: bool,
    ) -> Option<(String, bool)> {
        if !self.custom_icon {
            return None;
        }

        let (icon, closed) = if motion != Motion::Idle {
            // mid-motion reads keep the previous closed classification
            ("move", last_closed)
        } else if tilt_percent <= 15 {
            ("00", true)
        } else if tilt_percent <= 40 {
            ("25", self.partial_closed)
        } else if tilt_percent <= 60 {
            ("50", false)
        } else if tilt_percent <= 85 {
            ("75", self.partial_closed)
        } else {
            ("99", true)
        };

        let shade = if self.colour_icon && !closed {
            "active"
        } else {
            "inactive"
        };

        Some((format!("{ICON_ROOT}/{shade}/{icon}.svg"), closed))
    }
}
