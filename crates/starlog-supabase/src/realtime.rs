// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phoenix-protocol realtime subscription for live inserts.
//!
//! One websocket per subscription: join the channel, answer heartbeats,
//! forward decoded insert rows. The socket task ends when the consumer
//! drops the stream or the socket closes. There is no reconnect here;
//! the page opens a fresh subscription per session.

use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace, warn};

use starlog_core::{ExperienceRecord, InsertStream, StarlogError};

/// Channel topic joined for the result list.
pub(crate) const CHANNEL_TOPIC: &str = "realtime:experiences-list";

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Buffered rows between the socket task and the consumer.
const SUBSCRIPTION_BUFFER: usize = 64;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// One frame of the Phoenix channel protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PhoenixMessage {
    pub topic: String,
    pub event: String,
    pub payload: serde_json::Value,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub message_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_ref: Option<String>,
}

/// The join frame requesting INSERT notifications on `public.experiences`.
pub(crate) fn join_message() -> PhoenixMessage {
    PhoenixMessage {
        topic: CHANNEL_TOPIC.to_string(),
        event: "phx_join".to_string(),
        payload: json!({
            "config": {
                "postgres_changes": [
                    {"event": "INSERT", "schema": "public", "table": "experiences"}
                ]
            }
        }),
        message_ref: Some("1".to_string()),
        join_ref: Some("1".to_string()),
    }
}

/// A keepalive frame on the shared `phoenix` topic.
pub(crate) fn heartbeat_message(counter: u64) -> PhoenixMessage {
    PhoenixMessage {
        topic: "phoenix".to_string(),
        event: "heartbeat".to_string(),
        payload: json!({}),
        message_ref: Some(counter.to_string()),
        join_ref: None,
    }
}

/// Extracts the inserted row from a `postgres_changes` frame.
///
/// Returns `None` for frames that are not INSERT notifications, and the
/// decode result for those that are, so the caller can log and skip rows
/// that fail to decode.
pub(crate) fn insert_record(
    message: &PhoenixMessage,
) -> Option<Result<ExperienceRecord, serde_json::Error>> {
    if message.event != "postgres_changes" {
        return None;
    }
    let data = message.payload.get("data")?;
    if data.get("type").and_then(|t| t.as_str()) != Some("INSERT") {
        return None;
    }
    let record = data.get("record")?.clone();
    Some(serde_json::from_value(record))
}

/// Connects and joins, returning the live insert stream.
///
/// Connection failures surface here; everything after the connect flows
/// through the stream itself.
pub(crate) async fn subscribe(url: String) -> Result<InsertStream, StarlogError> {
    let (socket, _response) =
        connect_async(&url)
            .await
            .map_err(|e| StarlogError::Realtime {
                message: format!("websocket connect failed: {e}"),
                source: Some(Box::new(e)),
            })?;
    debug!(topic = CHANNEL_TOPIC, "realtime socket connected");

    let (sink, source) = socket.split();
    let (tx, mut rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
    tokio::spawn(run_subscription(sink, source, tx));

    Ok(Box::pin(futures::stream::poll_fn(move |cx| {
        rx.poll_recv(cx)
    })))
}

async fn run_subscription(
    mut sink: WsSink,
    mut source: WsSource,
    tx: mpsc::Sender<Result<ExperienceRecord, StarlogError>>,
) {
    if let Err(e) = send_frame(&mut sink, &join_message()).await {
        let _ = tx
            .send(Err(StarlogError::Realtime {
                message: format!("channel join failed: {e}"),
                source: None,
            }))
            .await;
        return;
    }

    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    // The immediate first tick would duplicate the join traffic.
    heartbeat.tick().await;
    let mut heartbeat_ref: u64 = 1;

    loop {
        tokio::select! {
            // Consumer dropped the stream: the page session is over.
            _ = tx.closed() => {
                debug!(topic = CHANNEL_TOPIC, "subscriber gone, closing realtime socket");
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
            _ = heartbeat.tick() => {
                heartbeat_ref += 1;
                if let Err(e) = send_frame(&mut sink, &heartbeat_message(heartbeat_ref)).await {
                    warn!(error = %e, "heartbeat send failed, closing subscription");
                    break;
                }
            }
            frame = source.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if !handle_frame(text.as_str(), &tx).await {
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        let _ = sink.send(Message::Pong(payload)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(topic = CHANNEL_TOPIC, "realtime socket closed");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        let _ = tx
                            .send(Err(StarlogError::Realtime {
                                message: format!("websocket read failed: {e}"),
                                source: Some(Box::new(e)),
                            }))
                            .await;
                        break;
                    }
                }
            }
        }
    }
}

/// Handles one text frame. Returns `false` when the subscription should end.
async fn handle_frame(
    text: &str,
    tx: &mpsc::Sender<Result<ExperienceRecord, StarlogError>>,
) -> bool {
    let message: PhoenixMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "unparseable realtime frame, skipping");
            return true;
        }
    };

    match message.event.as_str() {
        "phx_reply" => {
            let status = message
                .payload
                .get("status")
                .and_then(|s| s.as_str())
                .unwrap_or("unknown");
            if status == "ok" {
                trace!(topic = %message.topic, "phx_reply ok");
                return true;
            }
            let _ = tx
                .send(Err(StarlogError::Realtime {
                    message: format!("channel join rejected: {}", message.payload),
                    source: None,
                }))
                .await;
            false
        }
        "phx_error" | "phx_close" => {
            let _ = tx
                .send(Err(StarlogError::Realtime {
                    message: format!("channel terminated by server ({})", message.event),
                    source: None,
                }))
                .await;
            false
        }
        "postgres_changes" => {
            match insert_record(&message) {
                Some(Ok(record)) => {
                    // Send failure means the consumer is gone.
                    tx.send(Ok(record)).await.is_ok()
                }
                Some(Err(e)) => {
                    warn!(error = %e, "insert notification failed to decode, skipping");
                    true
                }
                None => true,
            }
        }
        other => {
            trace!(event = other, "ignoring realtime event");
            true
        }
    }
}

async fn send_frame(
    sink: &mut WsSink,
    message: &PhoenixMessage,
) -> Result<(), tokio_tungstenite::tungstenite::Error> {
    let encoded = serde_json::to_string(message).unwrap_or_default();
    sink.send(Message::Text(encoded.into())).await
}
