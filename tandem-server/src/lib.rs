pub mod config;
pub mod error;
pub mod room;
pub mod transport;
pub mod ws;

pub use config::RelayConfig;
pub use error::RelayError;
pub use room::*;
pub use transport::*;
pub use ws::*;
