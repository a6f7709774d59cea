use thiserror::Error;

/// Violations of the framing rules on a single connection.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The text frame is not a control message we understand. The stream can
    /// not be resynchronised after this.
    #[error("malformed control message: {0}")]
    MalformedControl(#[from] serde_json::Error),

    /// A second `file_metadata` arrived before the binary frame of the first.
    #[error("metadata for '{discarded}' superseded before its payload arrived")]
    StaleMetadata { discarded: String },

    /// A binary frame arrived with no pending metadata.
    #[error("binary frame of {len} bytes without preceding metadata")]
    OrphanBinary { len: usize },
}

impl ProtocolError {
    /// Whether the connection can keep going after this violation.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ProtocolError::MalformedControl(_))
    }
}
