use crate::transport::{Enqueued, Outbound};
use std::fmt;
use tandem_core::{ControlMessage, Correlation, PeerId, Role};
use tracing::debug;

/// What a connection hands to the registry when it joins: its identity and
/// the queue its writer drains.
#[derive(Clone)]
pub struct PeerConnection {
    pub id: PeerId,
    pub outbound: Outbound,
}

impl fmt::Debug for PeerConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerConnection").field("id", &self.id).finish()
    }
}

impl PeerConnection {
    pub fn new(id: PeerId, outbound: Outbound) -> Self {
        Self { id, outbound }
    }
}

/// A room occupant. Owned by exactly one room.
pub(crate) struct Peer {
    pub(crate) id: PeerId,
    pub(crate) role: Role,
    pub(crate) correlation: Correlation,
    pub(crate) outbound: Outbound,
}

impl Peer {
    pub(crate) fn new(connection: PeerConnection, role: Role) -> Self {
        Self {
            id: connection.id,
            role,
            correlation: Correlation::Idle,
            outbound: connection.outbound,
        }
    }

    pub(crate) fn notify(&self, msg: ControlMessage) {
        if self.outbound.push_control(msg) == Enqueued::Closed {
            debug!(peer = %self.id, "Status dropped, connection closing");
        }
    }
}
