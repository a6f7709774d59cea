use tandem_core::{BinaryFrame, ControlMessage};

/// A frame read from a peer's socket, already classified by transport kind.
#[derive(Debug, Clone)]
pub enum InboundFrame {
    Control(ControlMessage),
    Binary(BinaryFrame),
}
