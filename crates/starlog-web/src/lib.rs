// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-rendered web surface for the starlog experience journal.
//!
//! Four pages (start, strength summary, add-experience form, result list)
//! plus an SSE endpoint that feeds live inserts to the result page. All
//! handlers share one [`ExperienceStore`](starlog_core::ExperienceStore)
//! handle built at startup.

pub mod handlers;
pub mod live;
pub mod pages;
pub mod server;

pub use server::{AppState, build_router, start_server};
