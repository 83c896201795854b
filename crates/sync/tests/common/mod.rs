//! Common test utilities for sync integration tests.
//!
//! Provides an in-process WebSocket push server standing in for the
//! backend's `/ws/alerts` endpoint, plus fixture builders and a
//! helper for driving the synchronizer until a condition holds.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::SinkExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use idsfeed_client::{AlertRecord, AlertsClient};
use idsfeed_sync::FeedSynchronizer;

#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Commands for the one-shot push server.
#[allow(dead_code)]
enum PushCommand {
    Text(String),
    Close,
}

/// One-connection WebSocket push server.
///
/// Accepts a single client, then sends whatever frames the test asks
/// for. Dropping the handle tears the TCP stream down without a close
/// handshake, which the client observes as a transport error.
#[allow(dead_code)]
pub struct PushServer {
    addr: SocketAddr,
    commands: mpsc::Sender<PushCommand>,
}

#[allow(dead_code)]
impl PushServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (commands, mut rx) = mpsc::channel::<PushCommand>(32);

        tokio::spawn(async move {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                return;
            };
            while let Some(command) = rx.recv().await {
                match command {
                    PushCommand::Text(text) => {
                        if ws.send(Message::Text(text)).await.is_err() {
                            return;
                        }
                    }
                    PushCommand::Close => {
                        let _ = ws.close(None).await;
                        return;
                    }
                }
            }
            // Handle dropped: the stream is dropped here without a
            // close frame.
        });

        Self { addr, commands }
    }

    /// URL the session under test should connect to.
    pub fn url(&self) -> Url {
        Url::parse(&format!("ws://{}/ws/alerts", self.addr)).unwrap()
    }

    /// Push one JSON value as a text frame.
    pub async fn push_json(&self, value: &Value) {
        self.push_text(value.to_string()).await;
    }

    /// Push a raw text frame (for malformed payload tests).
    pub async fn push_text(&self, text: String) {
        self.commands.send(PushCommand::Text(text)).await.unwrap();
    }

    /// Close the connection with a proper close handshake.
    pub async fn close(&self) {
        let _ = self.commands.send(PushCommand::Close).await;
    }
}

/// An alert in the push channel's wire shape (structured details).
#[allow(dead_code)]
pub fn pushed_alert(id: i64) -> Value {
    json!({
        "id": id,
        "ts": "2024-05-01T12:00:00Z",
        "type": "PORT_SCAN",
        "src": "10.0.0.9",
        "details": {"type": "PORT_SCAN", "count": 11, "window_sec": 10}
    })
}

/// A snapshot body, oldest-first, in the backend's stored shape.
#[allow(dead_code)]
pub fn snapshot_body(ids: &[i64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| {
                json!({
                    "id": id,
                    "ts": "2024-05-01T12:00:00",
                    "type": "PORT_SCAN",
                    "src": "10.0.0.9",
                    "details": "{\"count\": 11}"
                })
            })
            .collect(),
    )
}

/// A bare record for feeding events directly into the fold.
#[allow(dead_code)]
pub fn record(id: i64) -> AlertRecord {
    AlertRecord {
        id,
        ts: None,
        kind: "PORT_SCAN".to_string(),
        src: None,
        details: None,
    }
}

/// Client pointed at a wiremock (or dead) backend.
#[allow(dead_code)]
pub fn client_for(base_url: &str) -> Arc<AlertsClient> {
    Arc::new(
        AlertsClient::builder()
            .base_url(base_url.to_string())
            .build()
            .unwrap(),
    )
}

/// Drive the synchronizer's event loop until `pred` holds, failing
/// the test after five seconds.
#[allow(dead_code)]
pub async fn tick_until<F>(sync: &mut FeedSynchronizer, pred: F)
where
    F: Fn(&FeedSynchronizer) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        while !pred(sync) {
            sync.tick().await;
        }
    })
    .await
    .expect("synchronizer did not reach expected state in time");
}

/// Ids of the alerts currently displayed, newest-first.
#[allow(dead_code)]
pub fn displayed_ids(sync: &FeedSynchronizer) -> Vec<i64> {
    sync.state().alerts().iter().map(|a| a.id).collect()
}

/// Opt-in log output for debugging: `RUST_LOG=debug cargo test`.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
