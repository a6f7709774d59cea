use crate::error::RelayError;
use crate::room::RoomSnapshot;
use crate::room::peer::PeerConnection;
use crate::transport::InboundFrame;
use tandem_core::{PeerId, Role};
use tokio::sync::oneshot;

/// Commands a room actor processes, one at a time and in arrival order.
#[derive(Debug)]
pub enum RoomCommand {
    /// A new connection asks to occupy the room.
    Join {
        peer: PeerConnection,
        reply: oneshot::Sender<Result<Role, RelayError>>,
    },

    /// A frame read from an occupant's socket.
    Frame { peer_id: PeerId, frame: InboundFrame },

    /// The occupant's connection is gone.
    Leave { peer_id: PeerId },

    Inspect { reply: oneshot::Sender<RoomSnapshot> },
}
