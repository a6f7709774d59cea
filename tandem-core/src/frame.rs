//! Codec for the two frame kinds a peer exchanges.
//!
//! The kind of a frame is decided by the transport (text or binary message),
//! never by looking at its content.

use crate::error::ProtocolError;
use crate::model::ControlMessage;
use bytes::Bytes;
use std::ops::Deref;

/// Raw payload bytes. Meaningful only together with the metadata that
/// preceded it on the same connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BinaryFrame(Bytes);

impl BinaryFrame {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl Deref for BinaryFrame {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

pub fn decode_control(text: &str) -> Result<ControlMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

pub fn encode_control(msg: &ControlMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(msg)?)
}

pub fn wrap_binary(bytes: impl Into<Bytes>) -> BinaryFrame {
    BinaryFrame(bytes.into())
}
