use serde::{Deserialize, Serialize};

/// Announces the payload of the binary frame that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    /// Rewritten by the relay on every copy it delivers; whatever the sender
    /// put here is ignored.
    #[serde(default)]
    pub is_sender: bool,
}

impl FileMetadata {
    pub fn new(file_name: impl Into<String>, file_type: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            file_type: file_type.into(),
            file_size,
            is_sender: false,
        }
    }

    pub fn tagged(&self, is_sender: bool) -> Self {
        Self {
            is_sender,
            ..self.clone()
        }
    }
}

/// Text frames exchanged with a peer.
///
/// New kinds of control traffic get a new `type`; existing ones keep their shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMessage {
    /// Server to peer only.
    Status { message: String, ready: bool },
    FileMetadata(FileMetadata),
}

impl ControlMessage {
    pub fn status(message: impl Into<String>, ready: bool) -> Self {
        ControlMessage::Status {
            message: message.into(),
            ready,
        }
    }
}

impl From<FileMetadata> for ControlMessage {
    fn from(metadata: FileMetadata) -> Self {
        ControlMessage::FileMetadata(metadata)
    }
}
