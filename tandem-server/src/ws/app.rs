use crate::config::RelayConfig;
use crate::room::RoomManager;
use crate::ws::ws_handler;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Router, routing::get};
use std::sync::Arc;
use tandem_core::RoomKey;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

pub struct AppState {
    pub rooms: RoomManager,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        let config = Arc::new(config);
        Self {
            rooms: RoomManager::new(config.clone()),
            config,
        }
    }
}

/// `/ws/{*room}` is the relay. With a web root, `GET /` also sends the browser
/// to a fresh room whose page is served at `/{room}`, assets under `/static`.
pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new().route("/ws/{*room}", get(ws_handler));

    if let Some(root) = &state.config.web_root {
        router = router
            .route("/", get(new_room))
            .route_service("/{room}", ServeFile::new(root.join("index.html")))
            .nest_service("/static", ServeDir::new(root.join("static")));
    }

    router.with_state(state)
}

async fn new_room() -> impl IntoResponse {
    let key = RoomKey::generate();
    (StatusCode::FOUND, [(header::LOCATION, key.to_string())])
}

pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    info!("Relay listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
