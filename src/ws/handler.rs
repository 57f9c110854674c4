//! WebSocket upgrade handlers for controllers and screens

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::app::AppState;
use crate::util::rate_limit::ControllerRateLimiter;
use crate::ws::protocol::{ControllerMsg, Orientation, ServerMsg};
use crate::ws::transport::{DeviceId, TransportEvent};

type WsSink = futures::stream::SplitSink<WebSocket, Message>;
type WsStream = futures::stream::SplitStream<WebSocket>;

/// Controller upgrade handler
pub async fn controller_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_controller(socket, state))
}

/// Screen (display) upgrade handler
pub async fn screen_ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_screen(socket, state))
}

/// Handle one controller socket from connect to disconnect
async fn handle_controller(socket: WebSocket, state: AppState) {
    let device_id = DeviceId::new();
    info!(device_id = %device_id, "Controller connected");

    let (mut ws_sink, ws_stream) = socket.split();

    let welcome = ServerMsg::Welcome {
        device_id,
        orientation: Orientation::Landscape,
    };
    if let Err(e) = send_json(&mut ws_sink, &welcome).await {
        error!(device_id = %device_id, error = %e, "Failed to send welcome");
        return;
    }

    // Outbox must exist before the session can address this device
    let outbox = state.session.transport.register(device_id);
    let events = state.session.event_tx.clone();

    if events.send(TransportEvent::Connected(device_id)).await.is_err() {
        error!(device_id = %device_id, "Screen session is gone");
        state.session.transport.unregister(device_id);
        return;
    }

    run_controller(device_id, ws_sink, ws_stream, outbox, &events).await;

    state.session.transport.unregister(device_id);
    let _ = events.send(TransportEvent::Disconnected(device_id)).await;

    info!(device_id = %device_id, "Controller disconnected");
}

/// Run the controller session with read/write split
async fn run_controller(
    device_id: DeviceId,
    mut ws_sink: WsSink,
    mut ws_stream: WsStream,
    mut outbox: mpsc::Receiver<ServerMsg>,
    events: &mpsc::Sender<TransportEvent>,
) {
    let rate_limiter = ControllerRateLimiter::new();

    // Writer task: session -> WebSocket
    let writer_handle = tokio::spawn(async move {
        while let Some(msg) = outbox.recv().await {
            if let Err(e) = send_json(&mut ws_sink, &msg).await {
                debug!(device_id = %device_id, error = %e, "WebSocket send failed");
                break;
            }
        }
    });

    // Reader loop: WebSocket -> session
    while let Some(result) = ws_stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                match serde_json::from_str::<ControllerMsg>(&text) {
                    Ok(msg) => {
                        if !rate_limiter.admit(&msg) {
                            warn!(device_id = %device_id, "Rate limited controller message");
                            continue;
                        }

                        if events
                            .send(TransportEvent::Message(device_id, msg))
                            .await
                            .is_err()
                        {
                            debug!(device_id = %device_id, "Event channel closed");
                            break;
                        }
                    }
                    Err(e) => {
                        debug!(device_id = %device_id, error = %e, "Ignoring malformed controller message");
                    }
                }
            }
            Ok(Message::Binary(_)) => {
                debug!(device_id = %device_id, "Received binary message, ignoring");
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                info!(device_id = %device_id, "Controller initiated close");
                break;
            }
            Err(e) => {
                warn!(device_id = %device_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    writer_handle.abort();
}

/// Stream rendered frames to a display until it goes away
async fn handle_screen(socket: WebSocket, state: AppState) {
    info!("Screen connected");

    let (mut ws_sink, mut ws_stream) = socket.split();
    let mut frames = state.session.frame_tx.subscribe();

    let writer_handle = tokio::spawn(async move {
        loop {
            match frames.recv().await {
                Ok(msg) => {
                    if let Err(e) = send_json(&mut ws_sink, &msg).await {
                        debug!(error = %e, "Screen send failed");
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Each frame carries the full state
                    debug!(lagged_count = n, "Screen lagged, skipping frames");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Screens send nothing meaningful; wait for close
    while let Some(result) = ws_stream.next().await {
        if matches!(result, Ok(Message::Close(_)) | Err(_)) {
            break;
        }
    }

    writer_handle.abort();
    info!("Screen disconnected");
}

/// Serialize and send a message over WebSocket
async fn send_json<T: Serialize>(sink: &mut WsSink, msg: &T) -> Result<(), String> {
    let json = serde_json::to_string(msg).map_err(|e| e.to_string())?;
    sink.send(Message::Text(json)).await.map_err(|e| e.to_string())
}
