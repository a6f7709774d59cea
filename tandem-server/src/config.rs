use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tunables of the relay.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Frames buffered per connection before the drop policy applies.
    pub outbound_capacity: usize,
    /// Commands buffered per room before senders wait.
    pub room_command_capacity: usize,
    /// Largest accepted WebSocket message, and so the largest file.
    pub max_message_size: usize,
    /// When set, upgrades whose `Origin` header differs are refused.
    pub allowed_origin: Option<String>,
    /// Directory holding the room page (`index.html`) and its `static/`
    /// assets. Without it only the relay endpoint is served.
    pub web_root: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            outbound_capacity: 256,
            room_command_capacity: 100,
            max_message_size: 500 * 1024 * 1024,
            allowed_origin: None,
            web_root: None,
        }
    }
}

impl RelayConfig {
    pub fn origin_allowed(&self, origin: Option<&str>) -> bool {
        match &self.allowed_origin {
            None => true,
            Some(allowed) => origin == Some(allowed.as_str()),
        }
    }
}
