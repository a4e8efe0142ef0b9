#![allow(dead_code)]
// Shared bootstrap for integration tests: each test gets its own server on an
// ephemeral port plus the in-memory host handle that drives it.

use futures::{SinkExt, StreamExt};
use playerdata_server::frameworks::host::InMemoryHost;
use playerdata_server::interface_adapters::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TestServer {
    pub url: String,
    pub host: Arc<InMemoryHost>,
}

/// Binds an ephemeral port and serves the socket endpoint in the background.
pub async fn spawn_server(randomizer_hooks: bool) -> TestServer {
    let host = InMemoryHost::new("test-version", randomizer_hooks);
    let state = Arc::new(AppState {
        source: host.clone(),
        hooks: host.hooks().clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        let _ = playerdata_server::run(listener, state).await;
    });

    TestServer {
        url: format!("ws://{addr}/playerData"),
        host,
    }
}

pub async fn connect(server: &TestServer) -> WsClient {
    let (ws, _) = connect_async(server.url.as_str()).await.expect("connect");
    ws
}

/// Connects and completes one command round-trip, guaranteeing the server
/// loop (and its hook subscriptions) is live before the test fires events.
pub async fn connect_synced(server: &TestServer) -> WsClient {
    let mut ws = connect(server).await;
    send(&mut ws, "version").await;
    let _ = recv_text(&mut ws).await;
    ws
}

pub async fn send(ws: &mut WsClient, text: &str) {
    ws.send(Message::text(text)).await.expect("send");
}

/// Next text frame from the server; panics after five seconds of silence.
pub async fn recv_text(ws: &mut WsClient) -> String {
    let deadline = Duration::from_secs(5);
    tokio::time::timeout(deadline, async {
        loop {
            let msg = ws
                .next()
                .await
                .expect("connection closed while awaiting a frame")
                .expect("websocket error");
            if msg.is_text() {
                return msg.into_text().expect("text frame").to_string();
            }
        }
    })
    .await
    .expect("timed out waiting for a frame")
}

/// Asserts no text frame arrives within the wait window.
pub async fn assert_silent(ws: &mut WsClient, wait: Duration) {
    let outcome = tokio::time::timeout(wait, async {
        loop {
            match ws.next().await {
                Some(Ok(msg)) if msg.is_text() => {
                    return msg.into_text().expect("text frame").to_string();
                }
                Some(Ok(_)) => continue,
                Some(Err(_)) | None => std::future::pending::<()>().await,
            }
        }
    })
    .await;

    if let Ok(frame) = outcome {
        panic!("expected silence but received: {frame}");
    }
}

/// Polls until every hook subscription for the host is gone.
pub async fn wait_for_unsubscribe(server: &TestServer) {
    for _ in 0..200 {
        let hooks = server.host.hooks();
        if hooks.active_fields().bool_tx.receiver_count() == 0
            && hooks.active_fields().int_tx.receiver_count() == 0
            && hooks.new_game_tx.receiver_count() == 0
            && hooks.save_loaded_tx.receiver_count() == 0
            && hooks.quit_tx.receiver_count() == 0
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("hook subscriptions were not released after close");
}
