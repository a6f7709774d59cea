use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque room identifier taken from the request path.
///
/// Two connections with equal keys share a room; nothing else about the key
/// is interpreted.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct RoomKey(String);

impl RoomKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Builds the key for a path captured after the `/ws` prefix, so that
    /// `/ws/abc` and a page served at `/abc` name the same room.
    pub fn from_path(path: &str) -> Self {
        if path.starts_with('/') {
            Self(path.to_string())
        } else {
            Self(format!("/{path}"))
        }
    }

    /// A fresh short path for a new room.
    pub fn generate() -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self(format!("/{}", &id[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RoomState {
    Empty,
    Waiting,
    Active,
}

impl RoomState {
    pub fn for_occupancy(occupants: usize) -> Self {
        match occupants {
            0 => RoomState::Empty,
            1 => RoomState::Waiting,
            _ => RoomState::Active,
        }
    }
}
