// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory experience store for deterministic testing.
//!
//! `MemoryStore` implements `ExperienceStore` entirely in process, with
//! scripted failures for the error paths and an injectable live channel,
//! enabling fast, CI-runnable tests without a hosted backend.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, broadcast};

use starlog_core::{
    ExperienceRecord, ExperienceStore, HealthStatus, InsertStream, ListFilter, NewExperience,
    StarlogError, StoreIdentity,
};

/// An in-memory store with scripted failures.
///
/// Insert failures are popped from a FIFO queue: queue one per write you
/// expect to fail, subsequent writes succeed. List failures are a toggle
/// because the read path degrades rather than retries per call.
pub struct MemoryStore {
    records: Arc<Mutex<Vec<ExperienceRecord>>>,
    insert_errors: Arc<Mutex<VecDeque<String>>>,
    identity: Arc<Mutex<Option<StoreIdentity>>>,
    live: broadcast::Sender<ExperienceRecord>,
    next_id: AtomicI64,
    insert_calls: AtomicUsize,
    fail_lists: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (live, _) = broadcast::channel(32);
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            insert_errors: Arc::new(Mutex::new(VecDeque::new())),
            identity: Arc::new(Mutex::new(None)),
            live,
            next_id: AtomicI64::new(1),
            insert_calls: AtomicUsize::new(0),
            fail_lists: AtomicBool::new(false),
        }
    }

    /// Puts a row directly into the store, without a live notification.
    pub async fn seed(&self, record: ExperienceRecord) {
        self.records.lock().await.push(record);
    }

    /// Snapshot of everything stored, in insertion order.
    pub async fn records(&self) -> Vec<ExperienceRecord> {
        self.records.lock().await.clone()
    }

    /// How many times `insert` was called, including failed calls.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Queues a failure message for the next insert.
    pub async fn fail_next_insert(&self, message: &str) {
        self.insert_errors
            .lock()
            .await
            .push_back(message.to_string());
    }

    /// Makes every list call fail until toggled back.
    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Sets the identity reported by `current_user`.
    pub async fn set_identity(&self, identity: Option<StoreIdentity>) {
        *self.identity.lock().await = identity;
    }

    /// Emits a record on the live channel without storing it, as if another
    /// client had inserted it.
    pub fn push_live(&self, record: ExperienceRecord) {
        let _ = self.live.send(record);
    }

    fn materialize(&self, record: &NewExperience) -> ExperienceRecord {
        ExperienceRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: record.title.clone(),
            activity_on: Some(record.activity_on.as_iso().to_string()),
            description: record.description.clone(),
            strengths: Some(record.strengths.clone()),
            star_s: record.star_s.clone(),
            star_t: record.star_t.clone(),
            star_a: record.star_a.clone(),
            star_r: record.star_r.clone(),
            scope: Some(record.scope.as_str().to_string()),
            created_at: Some(Utc::now()),
            user_id: None,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExperienceStore for MemoryStore {
    async fn insert(&self, record: &NewExperience) -> Result<ExperienceRecord, StarlogError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.insert_errors.lock().await.pop_front() {
            return Err(StarlogError::Store {
                message,
                source: None,
            });
        }

        let stored = self.materialize(record);
        self.records.lock().await.push(stored.clone());
        let _ = self.live.send(stored.clone());
        Ok(stored)
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<ExperienceRecord>, StarlogError> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(StarlogError::Store {
                message: "scripted list failure".into(),
                source: None,
            });
        }

        let mut rows: Vec<ExperienceRecord> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| match &filter.user_id {
                Some(user_id) => r.user_id.as_deref() == Some(user_id.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.activity_on
                .cmp(&a.activity_on)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn subscribe_inserts(&self) -> Result<InsertStream, StarlogError> {
        let rx = self.live.subscribe();
        Ok(Box::pin(futures::stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(record) => return Some((Ok(record), rx)),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })))
    }

    async fn current_user(&self) -> Result<Option<StoreIdentity>, StarlogError> {
        Ok(self.identity.lock().await.clone())
    }

    async fn health_check(&self) -> Result<HealthStatus, StarlogError> {
        Ok(HealthStatus::Healthy)
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use starlog_core::normalize;

    use super::*;

    fn submission(title: &str, date: &str) -> NewExperience {
        NewExperience {
            title: title.into(),
            activity_on: normalize(date).unwrap(),
            description: None,
            strengths: vec![],
            star_s: None,
            star_t: None,
            star_a: None,
            star_r: None,
            scope: starlog_core::Scope::InSchool,
        }
    }

    #[tokio::test]
    async fn inserts_are_stored_and_listed_newest_first() {
        let store = MemoryStore::new();
        store.insert(&submission("older", "2024.01.01")).await.unwrap();
        store.insert(&submission("newer", "2024.06.01")).await.unwrap();

        let rows = store.list(&ListFilter::default()).await.unwrap();
        assert_eq!(rows[0].title, "newer");
        assert_eq!(rows[1].title, "older");
        assert_eq!(store.insert_calls(), 2);
    }

    #[tokio::test]
    async fn same_date_rows_tiebreak_by_id_descending() {
        let store = MemoryStore::new();
        store.insert(&submission("first", "2024.03.05")).await.unwrap();
        store.insert(&submission("second", "2024.03.05")).await.unwrap();

        let rows = store.list(&ListFilter::default()).await.unwrap();
        assert_eq!(rows[0].title, "second");
    }

    #[tokio::test]
    async fn scripted_insert_failure_fires_once() {
        let store = MemoryStore::new();
        store.fail_next_insert("strengths must be text[]").await;

        let error = store
            .insert(&submission("t", "2024.03.05"))
            .await
            .unwrap_err();
        assert_eq!(error.user_message(), "strengths must be text[]");

        assert!(store.insert(&submission("t", "2024.03.05")).await.is_ok());
        assert_eq!(store.records().await.len(), 1);
    }

    #[tokio::test]
    async fn subscription_receives_stored_and_injected_rows() {
        let store = MemoryStore::new();
        let mut stream = store.subscribe_inserts().await.unwrap();

        let stored = store.insert(&submission("live", "2024.03.05")).await.unwrap();
        let received = stream.next().await.unwrap().unwrap();
        assert_eq!(received.id, stored.id);

        let mut injected = stored.clone();
        injected.id = 999;
        store.push_live(injected);
        assert_eq!(stream.next().await.unwrap().unwrap().id, 999);
    }

    #[tokio::test]
    async fn identity_filter_limits_rows() {
        let store = MemoryStore::new();
        let mine = ExperienceRecord {
            user_id: Some("me".into()),
            ..store.materialize(&submission("mine", "2024.03.05"))
        };
        let theirs = ExperienceRecord {
            user_id: Some("them".into()),
            ..store.materialize(&submission("theirs", "2024.03.06"))
        };
        store.seed(mine).await;
        store.seed(theirs).await;

        let rows = store.list(&ListFilter::for_user("me")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "mine");
    }
}
