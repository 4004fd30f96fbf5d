// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `starlog serve` command implementation.
//!
//! Builds the Supabase-backed store once from configuration and serves
//! the pages until interrupted.

use std::sync::Arc;

use starlog_config::StarlogConfig;
use starlog_core::{ExperienceStore, StarlogError};
use starlog_supabase::SupabaseStore;
use tracing::info;

/// Runs the `starlog serve` command.
///
/// The store handle built here is the only one the process ever creates;
/// every page shares it for the process lifetime.
pub async fn run_serve(
    config: StarlogConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), StarlogError> {
    init_tracing(&config.server.log_level);

    info!("starting starlog serve");

    let store = SupabaseStore::new(&config.supabase)?;
    let store: Arc<dyn ExperienceStore> = Arc::new(store);

    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);

    starlog_web::start_server(&host, port, store).await
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "starlog={log_level},starlog_web={log_level},starlog_supabase={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
