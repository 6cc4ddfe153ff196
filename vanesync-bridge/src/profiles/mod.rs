use std::time::Duration;

use crate::cover::Motion;

mod vogue;

pub use vogue::{
    CMD_CLOSE_CCW, CMD_CLOSE_CW, CMD_TILT_45, CMD_TILT_90, CMD_TILT_135, LouvoliteVogue,
};

/// Capability flags of one device type, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverCapabilities {
    pub supports_mid_point: bool,
    pub supports_lift: bool,
    pub lift_on_open: bool,
    pub sync_on_mid_point: bool,
}

/// Travel timings of one device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiltTimings {
    /// Rated travel time of the faster opening leg
    pub open: Duration,
    /// Rated travel time of the slower full-close leg
    pub close: Duration,
    /// Travel time per discrete tilt step
    pub step: Duration,
    /// Travel time of a mid-point sync move
    pub sync: Duration,
}

/// Policy seam between the generic timed position engine and one device
/// type: step geometry, timings, command opcodes and icon artwork.
pub trait BlindProfile: Send + Sync {
    /// Descriptive type label stamped on the device at construction.
    fn type_label(&self) -> &'static str;

    /// Discrete steps from fully closed to the mid point.
    fn mid_steps(&self) -> u8;

    /// Highest tilt step; targets past it close in the opposite rotation.
    fn max_step(&self) -> u8 {
        self.mid_steps() * 2
    }

    fn capabilities(&self) -> CoverCapabilities;

    fn timings(&self) -> &TiltTimings;

    /// Motion direction and command opcode for one discrete tilt target.
    fn target_command(&self, target: u8) -> (Motion, u8);

    fn close_command(&self) -> u8;

    fn open_command(&self) -> u8;

    fn mid_command(&self) -> u8;

    /// Time the hardware needs before a move over `steps` steps settles.
    fn travel_time(&self, steps: u8) -> Duration {
        self.timings().step * u32::from(steps)
    }

    /// Icon path and closed classification for the given estimate, or `None`
    /// for profiles without custom artwork.
    fn entity_picture(
        &self,
        _motion: Motion,
        _tilt_percent: u8,
        _last_closed: bool,
    ) -> Option<(String, bool)> {
        None
    }
}
