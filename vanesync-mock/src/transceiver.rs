use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::Mutex;
use tokio::time;

use vanesync_bridge::errors::TransportError;
use vanesync_bridge::transport::{CommandFrame, RfTransport};

/// Rated on-air time of a single frame transmission.
const FRAME_AIRTIME_MS: u64 = 26;
const MAX_JITTER_MS: u64 = 15;

/// Stand-in transceiver: logs frames and burns simulated airtime instead of
/// keying a radio.
pub struct MockTransceiver {
    history: Mutex<Vec<CommandFrame>>,
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
        }
    }

    pub async fn history(&self) -> Vec<CommandFrame> {
        self.history.lock().await.clone()
    }
}

#[async_trait]
impl RfTransport for MockTransceiver {
    async fn send_command(&self, frame: CommandFrame) -> Result<(), TransportError> {
        if frame.repeats == 0 {
            return Err(TransportError::InvalidFrame(
                "zero repetition count".to_string(),
            ));
        }

        let jitter = Duration::from_millis(rand::rng().random_range(0..=MAX_JITTER_MS));
        let airtime = (Duration::from_millis(FRAME_AIRTIME_MS) + frame.repeat_gap)
            * u32::from(frame.repeats)
            + jitter;

        tracing::info!(
            "Transmit {:#04x} to {} ({} repeats, {:?} on air)",
            frame.command,
            frame.device_id,
            frame.repeats,
            airtime
        );

        time::sleep(airtime).await;
        self.history.lock().await.push(frame);

        Ok(())
    }
}
