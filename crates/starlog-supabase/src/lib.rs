// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Supabase store adapter for the starlog experience journal.
//!
//! Implements [`starlog_core::ExperienceStore`] against a hosted backend:
//! PostgREST for inserts and the schema-tolerant list query, the auth
//! endpoint for session identity, and the Phoenix realtime protocol for
//! live insert notifications.

pub mod client;
pub mod types;

mod read_plan;
mod realtime;

pub use client::SupabaseStore;
