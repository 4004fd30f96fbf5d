// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page server built on axum.
//!
//! Sets up routes, middleware, and the shared store handle for the pages.

use std::sync::Arc;

use axum::{Router, routing::get};
use starlog_core::{ExperienceStore, StarlogError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::live;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The remote store behind every page; built once at startup.
    pub store: Arc<dyn ExperienceStore>,
}

/// Builds the page router over the given store.
///
/// Routes:
/// - GET  /              start page
/// - GET  /my-strength   strength summary
/// - GET  /addexperience add-experience form
/// - POST /addexperience form submission
/// - GET  /result        result list
/// - GET  /result/events live insert feed (SSE)
pub fn build_router(store: Arc<dyn ExperienceStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/", get(handlers::get_start))
        .route("/my-strength", get(handlers::get_my_strength))
        .route(
            "/addexperience",
            get(handlers::get_add_experience).post(handlers::post_add_experience),
        )
        .route("/result", get(handlers::get_result))
        .route("/result/events", get(live::get_result_events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the page server.
///
/// Binds to `host:port` and serves until ctrl-c or SIGTERM.
pub async fn start_server(
    host: &str,
    port: u16,
    store: Arc<dyn ExperienceStore>,
) -> Result<(), StarlogError> {
    let app = build_router(store);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StarlogError::Internal(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("starlog listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StarlogError::Internal(format!("server error: {e}")))?;

    Ok(())
}

/// Resolves when the process receives SIGINT (ctrl-c) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        signal(SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received SIGINT (ctrl-c), shutting down");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        }
    }
}
