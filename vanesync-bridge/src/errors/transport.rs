#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Command transmission failed: {0}")]
    SendFailed(String),

    #[error("Frame rejected by the link layer: {0}")]
    InvalidFrame(String),
}
