// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The live insert feed for the result page, bridged over SSE.
//!
//! SSE event format:
//! ```text
//! event: insert
//! data: {"id": 12, "title": "...", ...}
//!
//! event: error
//! data: {"error": "..."}
//! ```

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use futures::{StreamExt, future};

use starlog_core::InsertStream;

use crate::server::AppState;

/// GET /result/events
///
/// Opens one insert subscription for the page session and bridges it into
/// an SSE stream. Each stored row arrives as an `insert` event carrying
/// the row JSON; a subscription error emits one `error` event and ends
/// the stream. Dropping the response tears the subscription down.
pub async fn get_result_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = match state.store.subscribe_inserts().await {
        Ok(inserts) => bridge(inserts).boxed(),
        Err(err) => {
            tracing::warn!(error = %err, "insert subscription failed");
            stream::iter([Ok(error_event(&err.to_string()))]).boxed()
        }
    };

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Maps the insert stream into SSE events.
///
/// A row that fails to serialize is skipped, matching how undecodable
/// realtime payloads are handled upstream; a stream error ends the feed
/// after its `error` event.
fn bridge(inserts: InsertStream) -> impl Stream<Item = Result<Event, Infallible>> {
    inserts
        .scan(false, |ended, item| {
            if *ended {
                return future::ready(None);
            }
            let event = match item {
                Ok(record) => match serde_json::to_string(&record) {
                    Ok(json) => Some(Event::default().event("insert").data(json)),
                    Err(err) => {
                        tracing::warn!(id = record.id, error = %err, "skipping unserializable live row");
                        None
                    }
                },
                Err(err) => {
                    *ended = true;
                    Some(error_event(&err.to_string()))
                }
            };
            future::ready(Some(event))
        })
        .filter_map(|maybe| future::ready(maybe.map(Ok)))
}

fn error_event(message: &str) -> Event {
    Event::default()
        .event("error")
        .data(serde_json::json!({ "error": message }).to_string())
}
