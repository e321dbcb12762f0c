//! WebSocket upgrade handler

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        ConnectInfo, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::app::AppState;
use crate::game::{GameHandle, PlayerUpdate};
use crate::util::rate_limit::SessionRateLimiter;
use crate::util::time::unix_millis;
use crate::ws::protocol::{ClientMsg, ServerMsg};

/// WebSocket upgrade handler. Session identity is assigned here; there is
/// no authentication beyond it.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    State(state): State<AppState>,
) -> Response {
    let peer_addr = connect_info.map(|ConnectInfo(addr)| addr);
    ws.on_upgrade(move |socket| handle_socket(socket, peer_addr, state))
}

/// Handle the upgraded WebSocket connection
async fn handle_socket(socket: WebSocket, peer_addr: Option<SocketAddr>, state: AppState) {
    let session_id = Uuid::new_v4();
    let open = state.connections.open(session_id, peer_addr);
    info!(session_id = %session_id, peer = ?peer_addr, connections = open, "New connection");

    let (mut ws_sink, ws_stream) = socket.split();

    // The subscription is taken under the same lock as the init snapshot,
    // so every later broadcast reaches this session
    let (init, broadcast_rx) = state.game.connect(session_id);

    let sent = send_msg(&mut ws_sink, &init).await;
    match sent {
        Ok(()) => run_session(session_id, &state.game, ws_sink, ws_stream, broadcast_rx).await,
        Err(e) => error!(session_id = %session_id, error = %e, "Failed to send init"),
    }

    // Cleanup on disconnect
    state.game.disconnect(session_id);
    let connected_ms = state
        .connections
        .close(session_id)
        .map(|conn| unix_millis().saturating_sub(conn.connected_at))
        .unwrap_or(0);

    info!(
        session_id = %session_id,
        connected_ms,
        connections = state.connections.len(),
        "Connection closed"
    );
}

/// Run the WebSocket session with read/write split
async fn run_session(
    session_id: Uuid,
    game: &GameHandle,
    mut ws_sink: futures::stream::SplitSink<WebSocket, Message>,
    mut ws_stream: futures::stream::SplitStream<WebSocket>,
    mut broadcast_rx: broadcast::Receiver<ServerMsg>,
) {
    let rate_limiter = SessionRateLimiter::new();

    // Spawn writer task: broadcasts -> WebSocket
    let writer_handle = tokio::spawn(async move {
        loop {
            match broadcast_rx.recv().await {
                Ok(msg) => {
                    if let Err(e) = send_msg(&mut ws_sink, &msg).await {
                        debug!(session_id = %session_id, error = %e, "WebSocket send failed");
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(
                        session_id = %session_id,
                        lagged_count = n,
                        "Client lagged, skipping {} messages", n
                    );
                    // Continue - don't disconnect for lag
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!(session_id = %session_id, "Broadcast channel closed");
                    break;
                }
            }
        }
    });

    // Reader loop: WebSocket -> game
    while let Some(result) = ws_stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                if !rate_limiter.check() {
                    warn!(session_id = %session_id, "Rate limited client message");
                    continue;
                }

                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(client_msg) => handle_client_msg(session_id, game, client_msg),
                    Err(e) => {
                        warn!(session_id = %session_id, error = %e, "Failed to parse client message");
                    }
                }
            }
            Ok(Message::Binary(_)) => {
                warn!(session_id = %session_id, "Received binary message, ignoring");
            }
            Ok(Message::Ping(_)) => {
                debug!(session_id = %session_id, "Received ping");
            }
            Ok(Message::Pong(_)) => {
                debug!(session_id = %session_id, "Received pong");
            }
            Ok(Message::Close(_)) => {
                info!(session_id = %session_id, "Client initiated close");
                break;
            }
            Err(e) => {
                error!(session_id = %session_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Abort writer task
    writer_handle.abort();
}

/// Apply one parsed client message to the game
fn handle_client_msg(session_id: Uuid, game: &GameHandle, msg: ClientMsg) {
    match msg {
        ClientMsg::Update {
            x,
            y,
            score,
            radius,
        } => {
            let update = PlayerUpdate {
                x,
                y,
                score,
                radius,
            };
            // A late update from a session already removed is dropped
            if let Err(e) = game.update(session_id, update) {
                debug!(session_id = %session_id, error = %e, "Ignoring update");
            }
        }
        ClientMsg::RefreshCollectible { refresh } => {
            game.refresh_collectible(refresh);
        }
    }
}

/// Send a message over WebSocket
async fn send_msg(
    sink: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMsg,
) -> Result<(), String> {
    let json = serde_json::to_string(msg).map_err(|e| e.to_string())?;
    sink.send(Message::Text(json))
        .await
        .map_err(|e| e.to_string())
}
