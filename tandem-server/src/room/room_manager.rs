use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::room::peer::PeerConnection;
use crate::room::{Room, RoomCommand, RoomSnapshot};
use crate::transport::InboundFrame;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tandem_core::{PeerId, Role, RoomKey};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

pub(crate) struct RoomEntry {
    pub(crate) generation: u64,
    sender: mpsc::Sender<RoomCommand>,
}

/// Registry of live rooms, keyed by room key.
///
/// Each room runs as its own task; the registry only hands out the channel to
/// it. Operations on different keys never contend beyond the map shard.
#[derive(Clone)]
pub struct RoomManager {
    rooms: Arc<DashMap<RoomKey, RoomEntry>>,
    generations: Arc<AtomicU64>,
    config: Arc<RelayConfig>,
}

impl RoomManager {
    pub fn new(config: Arc<RelayConfig>) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            generations: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    /// Admits `peer` into the room at `key`, creating the room if needed.
    ///
    /// Fails with [`RelayError::RoomFull`] when two peers are already present.
    pub async fn join(&self, key: &RoomKey, peer: PeerConnection) -> Result<RoomHandle, RelayError> {
        loop {
            let (generation, sender) = self.room_sender(key);
            let (reply_tx, reply_rx) = oneshot::channel();
            let cmd = RoomCommand::Join {
                peer: peer.clone(),
                reply: reply_tx,
            };

            if sender.send(cmd).await.is_err() {
                self.discard(key, generation);
                continue;
            }

            match reply_rx.await {
                Ok(Ok(role)) => {
                    return Ok(RoomHandle {
                        key: key.clone(),
                        peer_id: peer.id,
                        role,
                        sender,
                    });
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => debug!(room = %key, "Room closed during join, retrying"),
            }
        }
    }

    /// Removes `peer_id` from the room at `key`. Leaving twice, or leaving a
    /// room that no longer exists, does nothing.
    pub async fn leave(&self, key: &RoomKey, peer_id: PeerId) {
        let Some(sender) = self.existing_sender(key) else {
            return;
        };
        let _ = sender.send(RoomCommand::Leave { peer_id }).await;
    }

    pub async fn inspect(&self, key: &RoomKey) -> Option<RoomSnapshot> {
        let sender = self.existing_sender(key)?;
        let (reply_tx, reply_rx) = oneshot::channel();
        sender
            .send(RoomCommand::Inspect { reply: reply_tx })
            .await
            .ok()?;
        reply_rx.await.ok()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn contains_room(&self, key: &RoomKey) -> bool {
        self.rooms.contains_key(key)
    }

    fn existing_sender(&self, key: &RoomKey) -> Option<mpsc::Sender<RoomCommand>> {
        self.rooms.get(key).map(|entry| entry.sender.clone())
    }

    fn room_sender(&self, key: &RoomKey) -> (u64, mpsc::Sender<RoomCommand>) {
        match self.rooms.entry(key.clone()) {
            Entry::Occupied(entry) => (entry.get().generation, entry.get().sender.clone()),
            Entry::Vacant(entry) => {
                info!(room = %key, "Creating new room");
                let generation = self.generations.fetch_add(1, Ordering::Relaxed);
                let (tx, rx) = mpsc::channel(self.config.room_command_capacity.max(1));

                let room = Room::new(key.clone(), generation, rx, self.rooms.clone());
                tokio::spawn(room.run());

                entry.insert(RoomEntry {
                    generation,
                    sender: tx.clone(),
                });
                (generation, tx)
            }
        }
    }

    fn discard(&self, key: &RoomKey, generation: u64) {
        self.rooms
            .remove_if(key, |_, entry| entry.generation == generation);
    }
}

/// A joined peer's link to its room.
#[derive(Clone)]
pub struct RoomHandle {
    key: RoomKey,
    peer_id: PeerId,
    role: Role,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    pub fn peer_id(&self) -> PeerId {
        self.peer_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Hands a frame to the room. Waits only if the room's command queue is full.
    pub async fn send_frame(&self, frame: InboundFrame) -> Result<(), RelayError> {
        self.sender
            .send(RoomCommand::Frame {
                peer_id: self.peer_id,
                frame,
            })
            .await
            .map_err(|_| RelayError::RoomClosed(self.key.clone()))
    }

    pub async fn leave(&self) {
        let _ = self
            .sender
            .send(RoomCommand::Leave {
                peer_id: self.peer_id,
            })
            .await;
    }
}
