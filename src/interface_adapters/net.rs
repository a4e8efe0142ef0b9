// WebSocket connection handling: upgrade, per-connection loop, forwarding.

use crate::interface_adapters::state::AppState;
use crate::use_cases::events::HookSubscription;
use crate::use_cases::session::Session;

use axum::{
    Error,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::broadcast;
use tracing::{debug, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    HooksClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

fn next_conn_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Extensions offered by the client are ignored at negotiation.
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let conn_id = next_conn_id();
    let span = info_span!("conn", conn_id);
    let _enter = span.enter();

    // Subscribe before the first await so no change notification is missed.
    let mut subscription = state.hooks.subscribe();
    let mut session = Session::new(state.source.clone());
    session.open();
    info!(variant = ?subscription.variant, "client connected");

    if let Err(e) = run_client_loop(&mut socket, &mut session, &mut subscription).await {
        warn!(error = ?e, "client loop exited with error");
    }
    // Dropping the subscription here detaches this connection from every hook.
}

enum LoopControl {
    Continue,
    Disconnect,
}

async fn run_client_loop(
    socket: &mut WebSocket,
    session: &mut Session,
    subscription: &mut HookSubscription,
) -> Result<(), NetError> {
    let mut msgs_in: u64 = 0;
    let mut msgs_out: u64 = 0;
    let mut fatal: Option<NetError> = None;

    loop {
        // disconnect becomes true on error
        let disconnect: bool = tokio::select! {
            // Inbound command from the client.
            incoming = socket.recv() => {
                match handle_incoming_ws(socket, incoming, session, &mut msgs_in, &mut msgs_out).await {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            // Boolean field-changed notification.
            changed = subscription.bool_rx.recv() => {
                match hook_event(changed, "bool", &mut fatal) {
                    Some(change) => {
                        let frame = session.echo_bool(&change.name, change.value);
                        forward(socket, frame.into_iter().collect(), &mut msgs_out).await
                    }
                    None => fatal.is_some(),
                }
            }

            // Integer field-changed notification.
            changed = subscription.int_rx.recv() => {
                match hook_event(changed, "int", &mut fatal) {
                    Some(change) => {
                        let frame = session.echo_int(&change.name, change.value);
                        forward(socket, frame.into_iter().collect(), &mut msgs_out).await
                    }
                    None => fatal.is_some(),
                }
            }

            // New game started.
            started = subscription.new_game_rx.recv() => {
                match hook_event(started, "new_game", &mut fatal) {
                    Some(()) => forward(socket, session.on_new_game(), &mut msgs_out).await,
                    None => fatal.is_some(),
                }
            }

            // Save loaded into a slot.
            loaded = subscription.save_loaded_rx.recv() => {
                match hook_event(loaded, "save_loaded", &mut fatal) {
                    Some(slot) => forward(socket, session.on_save_loaded(slot), &mut msgs_out).await,
                    None => fatal.is_some(),
                }
            }

            // Host application is quitting.
            quitting = subscription.quit_rx.recv() => {
                match hook_event(quitting, "quit", &mut fatal) {
                    Some(()) => {
                        let frame = session.on_quit();
                        forward(socket, frame.into_iter().collect(), &mut msgs_out).await
                    }
                    None => fatal.is_some(),
                }
            }
        };

        if disconnect {
            session.close();
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    debug!(msgs_in, msgs_out, "connection stats");
    info!("client disconnected");

    if let Some(err) = fatal { Err(err) } else { Ok(()) }
}

// Unwraps one broadcast hook event. Lagged receivers log and skip; a closed
// hook means the host side is gone and the connection should end.
fn hook_event<T>(
    event: Result<T, broadcast::error::RecvError>,
    hook: &'static str,
    fatal: &mut Option<NetError>,
) -> Option<T> {
    match event {
        Ok(value) => Some(value),
        Err(broadcast::error::RecvError::Lagged(n)) => {
            warn!(hook, missed = n, "hook events lagged; skipping");
            None
        }
        Err(broadcast::error::RecvError::Closed) => {
            warn!(hook, "hook channel closed; disconnecting");
            *fatal = Some(NetError::HooksClosed);
            None
        }
    }
}

async fn handle_incoming_ws(
    socket: &mut WebSocket,
    incoming: Option<Result<Message, Error>>,
    session: &Session,
    msgs_in: &mut u64,
    msgs_out: &mut u64,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                *msgs_in += 1;
                let replies = session.handle_text(&text);
                for reply in replies {
                    send_text(socket, reply).await?;
                    *msgs_out += 1;
                }
                Ok(LoopControl::Continue)
            }
            Message::Close(frame) => {
                match frame {
                    Some(frame) => {
                        info!(code = frame.code, reason = %frame.reason, "close frame received")
                    }
                    None => info!("close frame received"),
                }
                Ok(LoopControl::Disconnect)
            }
            // Binary frames are outside the protocol; tolerate them rather
            // than rejecting, same as any other unrecognized input path.
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
        },
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!("websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

// Best-effort write of already-formatted frames; a send failure disconnects.
async fn forward(socket: &mut WebSocket, frames: Vec<String>, msgs_out: &mut u64) -> bool {
    for frame in frames {
        if let Err(err) = send_text(socket, frame).await {
            warn!(error = ?err, "failed to forward frame");
            return true;
        }
        *msgs_out += 1;
    }
    false
}

async fn send_text(socket: &mut WebSocket, frame: String) -> Result<(), NetError> {
    socket
        .send(Message::Text(frame.into()))
        .await
        .map_err(NetError::Ws)
}
