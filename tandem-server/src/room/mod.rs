mod peer;
mod relay;
mod room;
mod room_command;
mod room_manager;
pub mod status;

pub use peer::PeerConnection;
pub(crate) use room::Room;
pub use room::{MAX_OCCUPANTS, RoomSnapshot};
pub use room_command::RoomCommand;
pub use room_manager::{RoomHandle, RoomManager};
