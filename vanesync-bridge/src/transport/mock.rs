use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::TransportError;

use super::{CommandFrame, RfTransport};

/// Records frames instead of radiating them.
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Mutex<Vec<CommandFrame>>,
    fail_sends: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following send fail.
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<CommandFrame> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_commands(&self) -> Vec<u8> {
        self.sent
            .lock()
            .await
            .iter()
            .map(|frame| frame.command)
            .collect()
    }
}

#[async_trait]
impl RfTransport for MockTransport {
    async fn send_command(&self, frame: CommandFrame) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed("mock link down".to_string()));
        }

        self.sent.lock().await.push(frame);

        Ok(())
    }
}
