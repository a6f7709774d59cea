use tandem_core::{ProtocolError, RoomKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The room already holds two peers.
    #[error("room is full")]
    RoomFull,

    /// A transfer completed while the sender was alone in its room.
    #[error("no recipient connected")]
    NoRecipient,

    /// An outbound queue had no room for the transfer.
    #[error("transfer of '{file_name}' aborted: outbound queue full")]
    TransferAborted { file_name: String },

    #[error("room {0} is no longer running")]
    RoomClosed(RoomKey),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
