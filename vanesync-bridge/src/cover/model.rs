use super::{LIFT_CLOSED, Motion};

/// Timed position estimate for one tilting cover.
///
/// The hardware reports nothing back, so this estimate is the only notion of
/// position the system has. The tilt step records the last commanded discrete
/// target, not a verified angle, and mutates only through `set_state` or
/// `begin_motion`.
#[derive(Debug, Clone, PartialEq)]
pub struct TiltState {
    max_step: u8,
    motion: Motion,
    tilt_step: u8,
    lift_position: u8,
    last_closed: bool,
}

impl TiltState {
    pub fn new(max_step: u8) -> Self {
        Self {
            max_step: max_step.max(1),
            motion: Motion::default(),
            tilt_step: 0,
            lift_position: LIFT_CLOSED,
            last_closed: true,
        }
    }

    /// True while no motion command is in flight.
    pub fn motion_allowed(&self) -> bool {
        self.motion == Motion::Idle
    }

    /// Runs the motion guard and the interim write as one indivisible step:
    /// returns false without touching the estimate while motion is already in
    /// progress.
    pub fn begin_motion(&mut self, motion: Motion, lift_position: u8, tilt_step: u8) -> bool {
        if !self.motion_allowed() {
            return false;
        }

        self.set_state(motion, lift_position, tilt_step);
        true
    }

    /// Single mutation point of the estimate.
    pub fn set_state(&mut self, motion: Motion, lift_position: u8, tilt_step: u8) {
        self.motion = motion;
        self.lift_position = lift_position;
        self.tilt_step = tilt_step.min(self.max_step);
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn tilt_step(&self) -> u8 {
        self.tilt_step
    }

    pub fn lift_position(&self) -> u8 {
        self.lift_position
    }

    pub fn max_step(&self) -> u8 {
        self.max_step
    }

    /// Linear 0-100 tilt percentage for a discrete step.
    pub fn steps_to_tilt(&self, step: u8) -> u8 {
        (u32::from(step.min(self.max_step)) * 100 / u32::from(self.max_step)) as u8
    }

    /// Nearest discrete step for a 0-100 tilt percentage.
    pub fn tilt_to_steps(&self, percent: u8) -> u8 {
        ((u32::from(percent.min(100)) * u32::from(self.max_step) + 50) / 100) as u8
    }

    /// Tilt percentage of the current estimate.
    pub fn tilt_position(&self) -> u8 {
        self.steps_to_tilt(self.tilt_step)
    }

    /// Settled at either extreme step; both mean fully turned louvres.
    pub fn is_closed(&self) -> bool {
        self.motion == Motion::Idle && (self.tilt_step == 0 || self.tilt_step == self.max_step)
    }

    pub(crate) fn last_closed(&self) -> bool {
        self.last_closed
    }

    pub(crate) fn set_last_closed(&mut self, closed: bool) {
        self.last_closed = closed;
    }
}
