//! Status notices sent to peers. These are the only user-visible signals the
//! relay produces.

use tandem_core::ControlMessage;

pub const WAITING: &str = "Waiting for other user...";
pub const READY: &str = "Connected! Ready to transfer.";
pub const DISCONNECTED: &str = "Other user disconnected.";
pub const ROOM_FULL: &str = "Room is full.";
pub const NO_RECIPIENT: &str = "No recipient connected.";
pub const MALFORMED: &str = "Malformed control message.";

pub fn waiting() -> ControlMessage {
    ControlMessage::status(WAITING, false)
}

pub fn ready() -> ControlMessage {
    ControlMessage::status(READY, true)
}

pub fn disconnected() -> ControlMessage {
    ControlMessage::status(DISCONNECTED, false)
}

pub fn room_full() -> ControlMessage {
    ControlMessage::status(ROOM_FULL, false)
}

pub fn no_recipient() -> ControlMessage {
    ControlMessage::status(NO_RECIPIENT, false)
}

pub fn malformed() -> ControlMessage {
    ControlMessage::status(MALFORMED, false)
}

/// Both peers are still present when a transfer is aborted, so the room stays ready.
pub fn transfer_aborted(file_name: &str) -> ControlMessage {
    ControlMessage::status(
        format!("Transfer aborted: {file_name} could not be delivered."),
        true,
    )
}
