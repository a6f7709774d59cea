use crate::error::RelayError;
use crate::room::peer::{Peer, PeerConnection};
use crate::room::relay::relay_transfer;
use crate::room::room_command::RoomCommand;
use crate::room::room_manager::RoomEntry;
use crate::room::status;
use crate::transport::InboundFrame;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{ControlMessage, PeerId, Role, RoomKey, RoomState};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub const MAX_OCCUPANTS: usize = 2;

/// Point-in-time view of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub key: RoomKey,
    pub state: RoomState,
    pub occupants: Vec<(PeerId, Role)>,
}

/// Single owner of a room's occupants and their correlation state.
///
/// Every join, leave and frame for the room goes through `command_rx`, so
/// they are serialized without a lock. Rooms never share state with each
/// other.
pub(crate) struct Room {
    key: RoomKey,
    generation: u64,
    occupants: Vec<Peer>,
    command_rx: mpsc::Receiver<RoomCommand>,
    registry: Arc<DashMap<RoomKey, RoomEntry>>,
}

impl Room {
    pub(crate) fn new(
        key: RoomKey,
        generation: u64,
        command_rx: mpsc::Receiver<RoomCommand>,
        registry: Arc<DashMap<RoomKey, RoomEntry>>,
    ) -> Self {
        Self {
            key,
            generation,
            occupants: Vec::with_capacity(MAX_OCCUPANTS),
            command_rx,
            registry,
        }
    }

    pub(crate) async fn run(mut self) {
        info!(room = %self.key, "Room event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            let is_leave = matches!(cmd, RoomCommand::Leave { .. });
            self.handle_command(cmd);

            if is_leave && self.occupants.is_empty() {
                self.shutdown().await;
                break;
            }
        }

        info!(room = %self.key, "Room event loop finished");
    }

    fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join { peer, reply } => {
                let result = self.join(peer);
                let _ = reply.send(result);
            }

            RoomCommand::Frame { peer_id, frame } => self.handle_frame(peer_id, frame),

            RoomCommand::Leave { peer_id } => self.leave(&peer_id),

            RoomCommand::Inspect { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn join(&mut self, connection: PeerConnection) -> Result<Role, RelayError> {
        if self.occupants.len() >= MAX_OCCUPANTS {
            warn!(room = %self.key, peer = %connection.id, "Join rejected, room is full");
            return Err(RelayError::RoomFull);
        }

        let role = if self.occupants.is_empty() {
            Role::First
        } else {
            Role::Second
        };

        info!(room = %self.key, peer = %connection.id, %role, "Peer joined");
        self.occupants.push(Peer::new(connection, role));

        if self.occupants.len() == MAX_OCCUPANTS {
            for peer in &self.occupants {
                peer.notify(status::ready());
            }
        } else {
            self.occupants[0].notify(status::waiting());
        }

        Ok(role)
    }

    fn leave(&mut self, peer_id: &PeerId) {
        let Some(index) = self.position(peer_id) else {
            return;
        };

        let peer = self.occupants.remove(index);
        if let Some(pending) = peer.correlation.pending() {
            debug!(room = %self.key, file = %pending.file_name, "Pending metadata discarded on leave");
        }
        info!(room = %self.key, peer = %peer_id, role = %peer.role, "Peer left");

        for remaining in &self.occupants {
            remaining.notify(status::disconnected());
        }
    }

    fn handle_frame(&mut self, peer_id: PeerId, frame: InboundFrame) {
        let Some(index) = self.position(&peer_id) else {
            debug!(room = %self.key, peer = %peer_id, "Frame from a peer no longer in the room");
            return;
        };

        let result = match frame {
            InboundFrame::Control(ControlMessage::FileMetadata(metadata)) => self.occupants[index]
                .correlation
                .on_metadata(metadata)
                .map_err(RelayError::from),

            InboundFrame::Control(ControlMessage::Status { .. }) => {
                warn!(room = %self.key, peer = %peer_id, "Ignoring status sent by a peer");
                Ok(())
            }

            InboundFrame::Binary(payload) => {
                match self.occupants[index].correlation.on_binary(payload) {
                    Ok(transfer) => {
                        let sender = &self.occupants[index];
                        let recipient = self.occupants.iter().find(|p| p.id != peer_id);
                        relay_transfer(sender, recipient, transfer)
                    }
                    Err(e) => Err(e.into()),
                }
            }
        };

        if let Err(e) = result {
            warn!(
                room = %self.key,
                peer = %peer_id,
                role = %self.occupants[index].role,
                error = %e,
                "Frame not relayed"
            );
        }
    }

    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            key: self.key.clone(),
            state: RoomState::for_occupancy(self.occupants.len()),
            occupants: self.occupants.iter().map(|p| (p.id, p.role)).collect(),
        }
    }

    fn position(&self, peer_id: &PeerId) -> Option<usize> {
        self.occupants.iter().position(|p| &p.id == peer_id)
    }

    /// Unregisters the room and drains what is still queued. Joins caught in
    /// the queue are dropped unanswered, which sends their callers back to
    /// the registry for a fresh room.
    async fn shutdown(&mut self) {
        let generation = self.generation;
        self.registry
            .remove_if(&self.key, |_, entry| entry.generation == generation);
        self.command_rx.close();

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                RoomCommand::Inspect { reply } => {
                    let _ = reply.send(self.snapshot());
                }
                RoomCommand::Join { peer, .. } => {
                    debug!(room = %self.key, peer = %peer.id, "Join deferred to a new room");
                }
                RoomCommand::Frame { .. } | RoomCommand::Leave { .. } => {}
            }
        }

        info!(room = %self.key, "Room destroyed");
    }
}
