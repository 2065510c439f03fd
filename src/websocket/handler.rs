use crate::{
    models::SessionSummary,
    websocket::{
        messages::{ClientMessage, ServerMessage},
        session::GameSession,
    },
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use dashmap::DashMap;
use futures::{sink::SinkExt, stream::StreamExt};
use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, time::Instant};
use uuid::Uuid;

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let mut session = match GameSession::new(state.config.game.rules(), state.config.game.timings())
    {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to start game session: {}", e);
            return;
        }
    };
    let session_id = session.id();

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    state
        .sessions
        .insert(session_id, SessionSummary::new(session_id, session.game()));
    tracing::info!("Game session {} started", session_id);

    // Spawn a task to send messages to the client
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    let _ = tx.send(session.snapshot()).await;

    // Parse socket frames on their own task so the game loop only sees client messages
    let (inbound_tx, inbound_rx) = mpsc::channel::<ClientMessage>(100);
    let error_tx = tx.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if inbound_tx.send(client_msg).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        let _ = error_tx
                            .send(ServerMessage::Error {
                                message: format!("Invalid message format: {}", e),
                            })
                            .await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client closed game session {}", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    drive(&mut session, inbound_rx, tx, &state.sessions).await;

    // The game loop ends once the receive task drops its sender, and dropping
    // the last outbound sender lets the send task drain and exit
    let _ = recv_task.await;
    let _ = send_task.await;

    state.sessions.remove(&session_id);

    tracing::info!(
        "Game session {} closed (score {}, {} match(es))",
        session_id,
        session.game().score(),
        session.game().successful_matches()
    );
}

/// Play one session until its inbound channel closes.
///
/// Client messages are applied as they arrive. A single timer runs the
/// session's follow-ups: settling a swap, then prompting after a match. It is
/// only armed while the session still has one to run, so clicks that arrive
/// while a swap resolves are dropped instead of re-arming it.
pub(crate) async fn drive(
    session: &mut GameSession,
    mut inbound: mpsc::Receiver<ClientMessage>,
    tx: mpsc::Sender<ServerMessage>,
    sessions: &DashMap<Uuid, SessionSummary>,
) {
    let timer = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(timer);
    let mut armed = false;

    loop {
        let step = tokio::select! {
            incoming = inbound.recv() => {
                let Some(msg) = incoming else {
                    break;
                };
                match session.handle(msg) {
                    Ok(step) => step,
                    Err(e) => {
                        tracing::error!("Error handling message: {}", e);
                        let _ = tx
                            .send(ServerMessage::Error {
                                message: e.to_string(),
                            })
                            .await;
                        continue;
                    }
                }
            }
            () = &mut timer, if armed => session.tick(),
        };

        if let Some(delay) = step.follow_up {
            timer.as_mut().reset(Instant::now() + delay);
        }
        armed = session.wants_tick();

        for msg in step.messages {
            let _ = tx.send(msg).await;
        }

        if let Some(mut summary) = sessions.get_mut(&session.id()) {
            summary.update(session.game());
        }
    }
}
