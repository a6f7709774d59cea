use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tandem_core::{BinaryFrame, ControlMessage, FileMetadata};
use tokio::sync::Notify;

/// Unit of work for a connection's writer.
///
/// A transfer is queued as one entry so its metadata and payload always reach
/// the socket back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Control(ControlMessage),
    Transfer {
        metadata: FileMetadata,
        payload: BinaryFrame,
    },
}

/// Result of offering a frame to an [`Outbound`] queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    Queued,
    /// Queued after dropping the oldest waiting control frame.
    EvictedControl,
    /// Queue full of transfers; the transfer was not queued.
    Rejected,
    /// The connection is shutting down.
    Closed,
}

impl Enqueued {
    pub fn is_queued(self) -> bool {
        matches!(self, Enqueued::Queued | Enqueued::EvictedControl)
    }
}

struct QueueState {
    frames: VecDeque<OutboundFrame>,
    closed: bool,
}

impl QueueState {
    fn has_control(&self) -> bool {
        self.frames
            .iter()
            .any(|f| matches!(f, OutboundFrame::Control(_)))
    }

    fn evict_oldest_control(&mut self) -> bool {
        let oldest = self
            .frames
            .iter()
            .position(|f| matches!(f, OutboundFrame::Control(_)));
        match oldest {
            Some(index) => {
                self.frames.remove(index);
                true
            }
            None => false,
        }
    }
}

struct Shared {
    state: Mutex<QueueState>,
    notify: Notify,
    capacity: usize,
}

/// Bounded queue between the room that produces frames for a peer and the task
/// writing them to that peer's socket.
///
/// Pushing never waits. At most `capacity` transfers are held, plus one slot
/// that only control frames may use, so a notice can always be queued. When
/// the queue is full the oldest control frame is evicted; queued transfers
/// are never evicted, so a transfer that can not make room is rejected and
/// the caller must surface it.
#[derive(Clone)]
pub struct Outbound {
    shared: Arc<Shared>,
}

impl Outbound {
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState {
                    frames: VecDeque::with_capacity(capacity.min(64)),
                    closed: false,
                }),
                notify: Notify::new(),
                capacity: capacity.max(1),
            }),
        }
    }

    pub fn push_control(&self, msg: ControlMessage) -> Enqueued {
        self.push(OutboundFrame::Control(msg))
    }

    pub fn push_transfer(&self, metadata: FileMetadata, payload: BinaryFrame) -> Enqueued {
        self.push(OutboundFrame::Transfer { metadata, payload })
    }

    fn push(&self, frame: OutboundFrame) -> Enqueued {
        let outcome = {
            let mut state = self.lock();
            if state.closed {
                return Enqueued::Closed;
            }

            let capacity = self.shared.capacity;
            let len = state.frames.len();
            let is_control = matches!(frame, OutboundFrame::Control(_));

            let outcome = if len < capacity {
                Enqueued::Queued
            } else if is_control && len == capacity && !state.has_control() {
                // Reserve slot: transfers never occupy it.
                Enqueued::Queued
            } else if (is_control || len == capacity) && state.evict_oldest_control() {
                Enqueued::EvictedControl
            } else {
                return Enqueued::Rejected;
            };

            state.frames.push_back(frame);
            outcome
        };

        self.shared.notify.notify_one();
        outcome
    }

    /// Waits for the next frame. After [`close`](Self::close) the frames
    /// already queued are still handed out, then `None`.
    pub async fn next(&self) -> Option<OutboundFrame> {
        loop {
            {
                let mut state = self.lock();
                if let Some(frame) = state.frames.pop_front() {
                    return Some(frame);
                }
                if state.closed {
                    return None;
                }
            }
            self.shared.notify.notified().await;
        }
    }

    pub fn try_next(&self) -> Option<OutboundFrame> {
        self.lock().frames.pop_front()
    }

    pub fn close(&self) {
        self.lock().closed = true;
        self.shared.notify.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn len(&self) -> usize {
        self.lock().frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // Every mutation completes under the guard; poisoning leaves no torn state.
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
