mod controller;
mod model;

pub use controller::TiltingCover;
pub use model::TiltState;

/// Lift sentinel for tilt-only devices, pinned to the closed position.
pub const LIFT_CLOSED: u8 = 0;

/// Modeled motion of the covering between commands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    #[default]
    Idle,
    Opening,
    Closing,
}
