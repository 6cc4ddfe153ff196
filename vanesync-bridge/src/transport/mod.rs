use std::time::Duration;

use async_trait::async_trait;

use crate::errors::TransportError;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::MockTransport;

/// One fire-and-forget command handed to the radio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    /// Radio address of the target device
    pub device_id: String,
    /// Single-byte opcode inside the larger frame the link layer assembles
    pub command: u8,
    /// On-air transmissions of this frame
    pub repeats: u8,
    /// Pause between repeated transmissions
    pub repeat_gap: Duration,
}

/// Write seam to the radio link.
///
/// The protocol carries no acknowledgments; reliability comes from the
/// configured repeat count, so callers never consult the result beyond
/// logging it.
#[async_trait]
pub trait RfTransport: Send + Sync {
    async fn send_command(&self, frame: CommandFrame) -> Result<(), TransportError>;
}
