pub mod correlation;
pub mod error;
pub mod frame;
pub mod model;

pub use correlation::{Correlation, Transfer};
pub use error::ProtocolError;
pub use frame::{BinaryFrame, decode_control, encode_control, wrap_binary};
pub use model::*;
