use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time;

use vanesync_api::models::{CoverOptions, DeviceInfo};

use crate::profiles::{BlindProfile, CoverCapabilities};
use crate::transport::{CommandFrame, RfTransport};

use super::model::TiltState;
use super::{LIFT_CLOSED, Motion};

/// Command engine for one tilting cover.
///
/// Composes a device profile (command mapping, timings, icon artwork) with
/// the shared timed position model and a radio transport. Every command path
/// runs the motion guard and the interim state write under a single lock
/// hold, then schedules a settle transition that assumes the hardware arrived
/// after its rated travel time. Overlapping commands are absorbed silently;
/// callers get the same return value either way.
pub struct TiltingCover<P, T>
where
    P: BlindProfile,
    T: RfTransport,
{
    device: DeviceInfo,
    profile: P,
    transport: Arc<T>,
    repeats: u8,
    repeat_gap: Duration,
    state: Arc<Mutex<TiltState>>,
}

impl<P, T> TiltingCover<P, T>
where
    P: BlindProfile,
    T: RfTransport,
{
    pub fn new(mut device: DeviceInfo, options: &CoverOptions, profile: P, transport: Arc<T>) -> Self {
        device.type_label = profile.type_label().to_string();

        tracing::info!(
            "Create {} tilting blind {}",
            profile.type_label(),
            device.device_id
        );

        Self {
            device,
            transport,
            repeats: options.signal_repetitions,
            repeat_gap: Duration::from_millis(options.signal_repetitions_delay_ms),
            state: Arc::new(Mutex::new(TiltState::new(profile.max_step()))),
            profile,
        }
    }

    /// Tilts the blind to a discrete step.
    ///
    /// `steps` feeds the travel-time heuristic and `target` picks the
    /// command; every deployed call site passes the target itself for both.
    /// Returns the clamped target step, which becomes the authoritative tilt
    /// step once the settle transition fires, not immediately.
    pub async fn tilt_to_step(&self, steps: u8, target: u8) -> u8 {
        let target = target.min(self.profile.max_step());
        let (motion, command) = self.profile.target_command(target);
        let mut delay = self.profile.travel_time(steps);

        if self.profile.capabilities().sync_on_mid_point && target == self.profile.mid_steps() {
            delay = delay.max(self.profile.timings().sync);
        }

        if self.begin(motion).await {
            tracing::info!(
                "Tilt blind {} to step {} (command {:#04x})",
                self.device.device_id,
                target,
                command
            );
            self.send(command).await;
            self.wait_and_set_state(delay, Motion::Idle, LIFT_CLOSED, target);
        }

        target
    }

    /// UI entry point: converts a 0-100 tilt percentage to the nearest
    /// discrete step and dispatches it.
    pub async fn set_tilt_position(&self, percent: u8) -> u8 {
        let step = self.state.lock().await.tilt_to_steps(percent);

        self.tilt_to_step(step, step).await
    }

    /// Closes the blind fully; settles at step 0 after the close travel time.
    pub async fn close(&self) -> Duration {
        let delay = self.profile.timings().close;

        if self.begin(Motion::Closing).await {
            tracing::info!("Close blind {}", self.device.device_id);
            self.send(self.profile.close_command()).await;
            self.wait_and_set_state(delay, Motion::Idle, LIFT_CLOSED, 0);
        }

        delay
    }

    /// Opens the blind. Vertical louvres are fully open at the mid rotation,
    /// so this settles at the mid step after the open travel time.
    pub async fn open(&self) -> Duration {
        let delay = self.profile.timings().open;

        if self.begin(Motion::Opening).await {
            tracing::info!("Open blind {}", self.device.device_id);
            self.send(self.profile.open_command()).await;
            self.wait_and_set_state(delay, Motion::Idle, LIFT_CLOSED, self.profile.mid_steps());
        }

        delay
    }

    /// Tilts the blind to its mid point.
    pub async fn tilt_to_mid(&self) -> Duration {
        let delay = self.profile.timings().open;

        if self.begin(Motion::Opening).await {
            tracing::info!("Tilt blind {} to mid", self.device.device_id);
            self.send(self.profile.mid_command()).await;
            self.wait_and_set_state(delay, Motion::Idle, LIFT_CLOSED, self.profile.mid_steps());
        }

        delay
    }

    /// True while no motion command is in flight.
    pub async fn motion_allowed(&self) -> bool {
        self.state.lock().await.motion_allowed()
    }

    /// Writes the modeled state directly; immediately visible to readers.
    pub async fn set_state(&self, motion: Motion, lift_position: u8, tilt_step: u8) {
        self.state
            .lock()
            .await
            .set_state(motion, lift_position, tilt_step);
    }

    /// Schedules the settle transition: after `delay` the estimate is
    /// forcibly assumed to have arrived. The deferred task holds its own
    /// state handle and always runs to completion; commands on other devices
    /// and status reads proceed during the wait.
    pub fn wait_and_set_state(
        &self,
        delay: Duration,
        motion_after: Motion,
        lift_after: u8,
        step_after: u8,
    ) {
        let state = Arc::clone(&self.state);
        let device_id = self.device.device_id.clone();

        tokio::spawn(async move {
            time::sleep(delay).await;

            state.lock().await.set_state(motion_after, lift_after, step_after);

            tracing::debug!(
                "Blind {} settled at step {} after {:?}",
                device_id,
                step_after,
                delay
            );
        });
    }

    pub async fn tilt_step(&self) -> u8 {
        self.state.lock().await.tilt_step()
    }

    /// Tilt percentage of the current estimate.
    pub async fn tilt_position(&self) -> u8 {
        self.state.lock().await.tilt_position()
    }

    pub async fn is_opening(&self) -> bool {
        self.state.lock().await.motion() == Motion::Opening
    }

    pub async fn is_closing(&self) -> bool {
        self.state.lock().await.motion() == Motion::Closing
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.is_closed()
    }

    /// Icon path for the current estimate, or `None` while custom icons are
    /// off. Reading caches the computed closed classification so a moving
    /// read can reuse it.
    pub async fn entity_picture(&self) -> Option<String> {
        let mut state = self.state.lock().await;
        let picture =
            self.profile
                .entity_picture(state.motion(), state.tilt_position(), state.last_closed());

        picture.map(|(path, closed)| {
            state.set_last_closed(closed);
            tracing::debug!("Returned icon attribute = {}", path);
            path
        })
    }

    pub fn capabilities(&self) -> CoverCapabilities {
        self.profile.capabilities()
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    /// Motion guard check plus interim write under one lock hold. The interim
    /// state keeps the last settled tilt step while the command is in flight.
    async fn begin(&self, motion: Motion) -> bool {
        let mut state = self.state.lock().await;
        let step = state.tilt_step();
        let accepted = state.begin_motion(motion, LIFT_CLOSED, step);

        if !accepted {
            tracing::warn!("Blind {} is moving, command ignored", self.device.device_id);
        }

        accepted
    }

    async fn send(&self, command: u8) {
        let frame = CommandFrame {
            device_id: self.device.device_id.clone(),
            command,
            repeats: self.repeats,
            repeat_gap: self.repeat_gap,
        };

        if let Err(e) = self.transport.send_command(frame).await {
            tracing::warn!(
                "Command transmission to {} failed: {}",
                self.device.device_id,
                e
            );
        }
    }
}
