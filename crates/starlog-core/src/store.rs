// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The remote store seam consumed by every page.
//!
//! The hosted backend is an external collaborator; this trait is the whole
//! contract the rest of the workspace sees. One implementation is built
//! from configuration at startup and shared for the process lifetime.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::StarlogError;
use crate::record::{ExperienceRecord, NewExperience, StoreIdentity};

/// A long-lived stream of rows pushed by the store as they are inserted.
pub type InsertStream =
    Pin<Box<dyn Stream<Item = Result<ExperienceRecord, StarlogError>> + Send>>;

/// Read-side filtering. Identity scoping is best-effort display filtering,
/// not an access-control boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub user_id: Option<String>,
}

impl ListFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}

/// Result of a store health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is reachable and answering queries.
    Healthy,
    /// Store is reachable but something is off (e.g. anonymous session).
    Degraded(String),
    /// Store is not usable.
    Unhealthy(String),
}

/// The remote experience store.
///
/// `insert` is the only write this system performs; there is no update or
/// delete. `list` must return rows ordered by activity date descending,
/// then id descending.
#[async_trait]
pub trait ExperienceStore: Send + Sync + 'static {
    /// Persists one validated submission and returns the stored row.
    async fn insert(&self, record: &NewExperience) -> Result<ExperienceRecord, StarlogError>;

    /// Loads all rows matching `filter`, newest activity first.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<ExperienceRecord>, StarlogError>;

    /// Opens a live subscription to newly inserted rows.
    ///
    /// One subscription per list-page session; dropping the stream tears
    /// the subscription down.
    async fn subscribe_inserts(&self) -> Result<InsertStream, StarlogError>;

    /// The identity behind the store session, if any.
    async fn current_user(&self) -> Result<Option<StoreIdentity>, StarlogError>;

    /// Probes the store for the `check` command.
    async fn health_check(&self) -> Result<HealthStatus, StarlogError>;
}
