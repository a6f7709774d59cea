mod control;
mod peer;
mod room;

pub use control::{ControlMessage, FileMetadata};
pub use peer::{PeerId, Role};
pub use room::{RoomKey, RoomState};
