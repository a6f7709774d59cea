mod app;
mod ws_handler;

pub use app::{AppState, router, serve};
pub use ws_handler::ws_handler;
