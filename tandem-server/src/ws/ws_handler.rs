use crate::error::RelayError;
use crate::room::{PeerConnection, RoomHandle, status};
use crate::transport::{InboundFrame, Outbound, OutboundFrame};
use crate::ws::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tandem_core::{ControlMessage, PeerId, RoomKey, decode_control, encode_control, wrap_binary};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How long a closing connection may keep flushing its outbound queue.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(room): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());
    if !state.config.origin_allowed(origin) {
        warn!(?origin, "WebSocket upgrade refused, origin not allowed");
        return StatusCode::FORBIDDEN.into_response();
    }

    let key = RoomKey::from_path(&room);
    let max_size = state.config.max_message_size;

    ws.max_message_size(max_size)
        .max_frame_size(max_size)
        .on_upgrade(move |socket| handle_socket(socket, key, state))
        .into_response()
}

async fn handle_socket(socket: WebSocket, key: RoomKey, state: Arc<AppState>) {
    let peer_id = PeerId::new();
    info!(%peer_id, room = %key, "New WebSocket connection");

    let (sender, receiver) = socket.split();
    let outbound = Outbound::new(state.config.outbound_capacity);

    let send_task = tokio::spawn(write_loop(sender, outbound.clone()));

    let room = match state
        .rooms
        .join(&key, PeerConnection::new(peer_id, outbound.clone()))
        .await
    {
        Ok(room) => room,
        Err(e) => {
            warn!(%peer_id, room = %key, error = %e, "Join refused");
            if matches!(e, RelayError::RoomFull) {
                outbound.push_control(status::room_full());
            }
            finish(outbound, Some(send_task)).await;
            return;
        }
    };
    info!(%peer_id, room = %key, role = %room.role(), "Peer admitted");

    let recv_task = tokio::spawn(read_loop(receiver, room.clone(), outbound.clone()));
    let writer = first_to_stop(send_task, recv_task).await;

    room.leave().await;
    finish(outbound, writer).await;
    info!(%peer_id, room = %key, "WebSocket disconnected");
}

/// Waits until either half of the connection stops. The writer is handed back
/// only while it is still running; a finished handle must not be polled again.
async fn first_to_stop(
    mut send_task: JoinHandle<()>,
    mut recv_task: JoinHandle<()>,
) -> Option<JoinHandle<()>> {
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            None
        }
        _ = &mut recv_task => Some(send_task),
    }
}

/// Lets the writer flush what is queued, send a close frame and stop.
async fn finish(outbound: Outbound, send_task: Option<JoinHandle<()>>) {
    outbound.close();
    let Some(mut send_task) = send_task else {
        return;
    };
    if tokio::time::timeout(CLOSE_GRACE, &mut send_task).await.is_err() {
        send_task.abort();
    }
}

async fn read_loop(mut receiver: SplitStream<WebSocket>, room: RoomHandle, outbound: Outbound) {
    while let Some(Ok(msg)) = receiver.next().await {
        let frame = match msg {
            Message::Text(text) => match decode_control(text.as_str()) {
                Ok(control) => InboundFrame::Control(control),
                Err(e) => {
                    warn!(peer = %room.peer_id(), error = %e, "Closing connection");
                    outbound.push_control(status::malformed());
                    break;
                }
            },
            Message::Binary(data) => InboundFrame::Binary(wrap_binary(data)),
            Message::Close(_) => break,
            _ => continue,
        };

        if let Err(e) = room.send_frame(frame).await {
            error!("Room died: {}", e);
            break;
        }
    }
}

async fn write_loop(mut sender: SplitSink<WebSocket, Message>, outbound: Outbound) {
    while let Some(frame) = outbound.next().await {
        if write_frame(&mut sender, frame).await.is_err() {
            return;
        }
    }

    let _ = sender.send(Message::Close(None)).await;
}

async fn write_frame(
    sender: &mut SplitSink<WebSocket, Message>,
    frame: OutboundFrame,
) -> Result<(), axum::Error> {
    let (control, payload) = match frame {
        OutboundFrame::Control(msg) => (msg, None),
        OutboundFrame::Transfer { metadata, payload } => {
            (ControlMessage::FileMetadata(metadata), Some(payload))
        }
    };

    let json = match encode_control(&control) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize control message: {}", e);
            return Ok(());
        }
    };

    sender.send(Message::Text(json.into())).await?;
    if let Some(payload) = payload {
        sender.send(Message::Binary(payload.into_bytes())).await?;
    }
    Ok(())
}
