//! Pairs each binary frame with the metadata announced just before it.

use crate::error::ProtocolError;
use crate::frame::BinaryFrame;
use crate::model::FileMetadata;
use std::mem;

/// A completed `(metadata, payload)` pair ready to be relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub metadata: FileMetadata,
    pub payload: BinaryFrame,
}

/// Per-connection correlation state.
///
/// There is no terminal state: the value is dropped together with its peer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Correlation {
    #[default]
    Idle,
    AwaitingBinary(FileMetadata),
}

impl Correlation {
    /// Records announced metadata.
    ///
    /// The new metadata is adopted in every case. If an earlier announcement
    /// was still waiting for its payload it is discarded and reported as
    /// [`ProtocolError::StaleMetadata`].
    pub fn on_metadata(&mut self, metadata: FileMetadata) -> Result<(), ProtocolError> {
        match mem::replace(self, Correlation::AwaitingBinary(metadata)) {
            Correlation::Idle => Ok(()),
            Correlation::AwaitingBinary(stale) => Err(ProtocolError::StaleMetadata {
                discarded: stale.file_name,
            }),
        }
    }

    /// Consumes the pending metadata with this payload. Without pending
    /// metadata the frame is rejected as [`ProtocolError::OrphanBinary`] and
    /// the state stays `Idle`.
    pub fn on_binary(&mut self, payload: BinaryFrame) -> Result<Transfer, ProtocolError> {
        match mem::take(self) {
            Correlation::AwaitingBinary(metadata) => Ok(Transfer { metadata, payload }),
            Correlation::Idle => Err(ProtocolError::OrphanBinary { len: payload.len() }),
        }
    }

    pub fn pending(&self) -> Option<&FileMetadata> {
        match self {
            Correlation::Idle => None,
            Correlation::AwaitingBinary(metadata) => Some(metadata),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Correlation::Idle)
    }
}
