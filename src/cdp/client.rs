// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Low-level DevTools WebSocket client
//!
//! Connects to a browser's DevTools endpoint and speaks JSON-RPC 2.0:
//! commands go out with auto-incrementing ids, responses are correlated back
//! to the waiting caller, and unsolicited events are forwarded on an
//! unbounded channel. A background task owns the read half for the life of
//! the connection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::{Error, Result};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;
type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<CdpResponse>>>>;

/// Default time to wait for a command response
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// An event received from the browser
#[derive(Debug, Clone)]
pub struct CdpEvent {
    /// Event method name (e.g. "Network.requestIntercepted")
    pub method: String,
    /// Event parameters
    pub params: Value,
}

/// A response to a previously sent command
#[derive(Debug, Clone)]
pub struct CdpResponse {
    /// Command id this response correlates to
    pub id: u64,
    /// Result value on success
    pub result: Option<Value>,
    /// Error object on failure
    pub error: Option<CdpResponseError>,
}

/// Error object inside a command response
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CdpResponseError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct CdpCommand<'a> {
    id: u64,
    method: &'a str,
    params: Value,
}

/// DevTools WebSocket client.
///
/// Cheap to share behind an `Arc`; all command methods take `&self`. Events
/// arrive on the receiver returned by [`CdpClient::connect`].
pub struct CdpClient {
    next_id: AtomicU64,
    pending: PendingMap,
    writer: Arc<Mutex<WsSink>>,
    _reader: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to a DevTools WebSocket endpoint.
    ///
    /// `ws_url` is the per-target endpoint, typically of the form
    /// `ws://localhost:9222/devtools/page/<target-id>`. Returns the client
    /// and the stream of events the browser pushes; the stream closes when
    /// the connection drops.
    pub async fn connect(ws_url: &str) -> Result<(Self, mpsc::UnboundedReceiver<CdpEvent>)> {
        tracing::info!(url = ws_url, "Connecting to DevTools endpoint");

        let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| Error::connection(ws_url, e.to_string()))?;

        let (writer, reader) = ws_stream.split();

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let reader_pending = Arc::clone(&pending);
        let reader_handle = tokio::spawn(async move {
            Self::read_loop(reader, reader_pending, event_tx).await;
        });

        tracing::debug!(url = ws_url, "DevTools connection established");

        Ok((
            Self {
                next_id: AtomicU64::new(1),
                pending,
                writer: Arc::new(Mutex::new(writer)),
                _reader: reader_handle,
            },
            event_rx,
        ))
    }

    /// Send a command and wait for its response with the default timeout
    pub async fn command(&self, method: &str, params: Value) -> Result<Value> {
        self.command_with_timeout(method, params, COMMAND_TIMEOUT)
            .await
    }

    /// Send a command and wait for its response
    pub async fn command_with_timeout(
        &self,
        method: &str,
        params: Value,
        timeout: Duration,
    ) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let json = serde_json::to_string(&CdpCommand { id, method, params })?;

        tracing::debug!(id = id, method = method, "Sending command");

        // register before sending so the response can never race past us
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        {
            let mut writer = self.writer.lock().await;
            writer
                .send(Message::Text(json))
                .await
                .map_err(|e| Error::protocol(format!("WebSocket send failed: {}", e)))?;
        }

        let response = tokio::time::timeout(timeout, rx)
            .await
            .map_err(|_| Error::timeout(method, timeout.as_millis() as u64))?
            .map_err(|_| Error::protocol("response channel closed".to_string()))?;

        if let Some(err) = response.error {
            return Err(Error::Devtools {
                code: err.code,
                message: err.message,
            });
        }

        Ok(response.result.unwrap_or(Value::Null))
    }

    /// Background task that reads frames and dispatches them
    async fn read_loop(
        mut reader: WsSource,
        pending: PendingMap,
        event_tx: mpsc::UnboundedSender<CdpEvent>,
    ) {
        while let Some(frame) = reader.next().await {
            let frame = match frame {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!(error = %e, "WebSocket read error, stopping reader");
                    break;
                }
            };

            let text = match frame {
                Message::Text(t) => t,
                Message::Binary(b) => match String::from_utf8(b) {
                    Ok(s) => s,
                    Err(_) => continue,
                },
                Message::Close(_) => {
                    tracing::info!("DevTools connection closed by remote");
                    break;
                }
                _ => continue,
            };

            let json: Value = match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "Unparseable frame from browser");
                    continue;
                }
            };

            if let Some(response) = parse_response(&json) {
                let mut guard = pending.lock().await;
                if let Some(tx) = guard.remove(&response.id) {
                    let _ = tx.send(response);
                } else {
                    tracing::debug!(id = response.id, "Response for unknown command id");
                }
            } else if let Some(event) = parse_event(&json) {
                // nobody listening just means the session is shutting down
                let _ = event_tx.send(event);
            }
        }

        // fail any caller still waiting once the connection is gone
        let mut guard = pending.lock().await;
        for (id, tx) in guard.drain() {
            let _ = tx.send(CdpResponse {
                id,
                result: None,
                error: Some(CdpResponseError {
                    code: -1,
                    message: "connection closed".to_string(),
                }),
            });
        }
    }
}

/// Parse a frame as a command response (a message carrying an `id`)
fn parse_response(json: &Value) -> Option<CdpResponse> {
    let id = json.get("id")?.as_u64()?;
    Some(CdpResponse {
        id,
        result: json.get("result").cloned(),
        error: json
            .get("error")
            .and_then(|e| serde_json::from_value(e.clone()).ok()),
    })
}

/// Parse a frame as an event (a `method` without an `id`)
fn parse_event(json: &Value) -> Option<CdpEvent> {
    if json.get("id").is_some() {
        return None;
    }
    let method = json.get("method")?.as_str()?.to_string();
    let params = json.get("params").cloned().unwrap_or(Value::Null);
    Some(CdpEvent { method, params })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_success() {
        let json = serde_json::json!({
            "id": 7,
            "result": { "body": "aGVsbG8=", "base64Encoded": true }
        });

        let resp = parse_response(&json).unwrap();
        assert_eq!(resp.id, 7);
        assert!(resp.error.is_none());
        assert_eq!(resp.result.unwrap()["base64Encoded"], true);
    }

    #[test]
    fn test_parse_response_error() {
        let json = serde_json::json!({
            "id": 2,
            "error": { "code": -32000, "message": "No resource with given identifier" }
        });

        let resp = parse_response(&json).unwrap();
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "No resource with given identifier");
    }

    #[test]
    fn test_parse_event() {
        let json = serde_json::json!({
            "method": "Network.requestIntercepted",
            "params": { "interceptionId": "interception-job-1" }
        });

        let event = parse_event(&json).unwrap();
        assert_eq!(event.method, "Network.requestIntercepted");
        assert_eq!(event.params["interceptionId"], "interception-job-1");
    }

    #[test]
    fn test_event_and_response_are_disjoint() {
        // a message with an id is a response, never an event
        let json = serde_json::json!({ "id": 1, "method": "Page.navigate", "result": {} });
        assert!(parse_event(&json).is_none());
        assert!(parse_response(&json).is_some());

        // and vice versa
        let json = serde_json::json!({ "method": "Page.loadEventFired" });
        assert!(parse_response(&json).is_none());
        let event = parse_event(&json).unwrap();
        assert_eq!(event.params, Value::Null);
    }

    #[test]
    fn test_command_serialization() {
        let cmd = CdpCommand {
            id: 3,
            method: "Network.enable",
            params: serde_json::json!({ "maxTotalBufferSize": -1 }),
        };
        let json = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["method"], "Network.enable");
        assert_eq!(json["params"]["maxTotalBufferSize"], -1);
    }
}
