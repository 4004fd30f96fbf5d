// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the hosted backend's PostgREST and auth surfaces.
//!
//! Provides [`SupabaseStore`], the one [`ExperienceStore`] implementation.
//! Constructed once at startup from the two configured credentials and held
//! for the process lifetime.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use tracing::{debug, info, warn};

use starlog_config::SupabaseConfig;
use starlog_core::{
    ExperienceRecord, ExperienceStore, HealthStatus, InsertStream, ListFilter, NewExperience,
    StarlogError, StoreIdentity,
};

use crate::read_plan::EXPERIENCES_PLAN;
use crate::realtime;
use crate::types::{AuthUser, PostgrestError};

/// Table holding experience rows.
const EXPERIENCES_TABLE: &str = "experiences";

/// Newest activity first, id as tiebreak.
const ORDER_NEWEST_FIRST: &str = "activity_on.desc,id.desc";

/// Client for the hosted experience store.
///
/// Every request carries the anon key as both `apikey` and bearer
/// authorization; the optional user access token only replaces the bearer
/// on the auth probe. Requests have no overall timeout on purpose: a hung
/// call leaves the caller waiting, it never aborts.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    rest_base: String,
    auth_base: String,
    realtime_url: String,
    access_token: Option<String>,
}

impl SupabaseStore {
    /// Creates a store handle from validated configuration.
    ///
    /// Missing credentials are a fatal configuration error; config
    /// validation reports them before this runs, so the error here is a
    /// backstop, not a user surface.
    pub fn new(config: &SupabaseConfig) -> Result<Self, StarlogError> {
        let url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| StarlogError::Config("supabase.url is not set".into()))?;
        let anon_key = config
            .anon_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StarlogError::Config("supabase.anon_key is not set".into()))?;

        let base = url.trim_end_matches('/');

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(anon_key)
                .map_err(|e| StarlogError::Config(format!("invalid anon key value: {e}")))?,
        );
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {anon_key}"))
                .map_err(|e| StarlogError::Config(format!("invalid anon key value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StarlogError::Store {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(endpoint = %base, "store client constructed");

        Ok(Self {
            client,
            rest_base: format!("{base}/rest/v1"),
            auth_base: format!("{base}/auth/v1"),
            realtime_url: realtime_endpoint(base, anon_key),
            access_token: config
                .access_token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        })
    }

    /// The derived websocket endpoint, exposed for the `check` command.
    pub fn realtime_url(&self) -> &str {
        &self.realtime_url
    }

    async fn select(
        &self,
        columns: &str,
        filter: &ListFilter,
    ) -> Result<Vec<ExperienceRecord>, StarlogError> {
        let url = format!("{}/{EXPERIENCES_TABLE}", self.rest_base);
        let mut request = self
            .client
            .get(&url)
            .query(&[("select", columns), ("order", ORDER_NEWEST_FIRST)]);
        if let Some(user_id) = &filter.user_id {
            let predicate = format!("eq.{user_id}");
            request = request.query(&[("user_id", predicate.as_str())]);
        }

        let response = request.send().await.map_err(|e| StarlogError::Store {
            message: format!("select request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(status = %status, columns, "select response received");
        if !status.is_success() {
            return Err(rejection(status, response).await);
        }

        response.json().await.map_err(|e| StarlogError::Store {
            message: format!("failed to decode select response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl ExperienceStore for SupabaseStore {
    async fn insert(&self, record: &NewExperience) -> Result<ExperienceRecord, StarlogError> {
        let url = format!("{}/{EXPERIENCES_TABLE}", self.rest_base);
        let response = self
            .client
            .post(&url)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await
            .map_err(|e| StarlogError::Store {
                message: format!("insert request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "insert response received");
        if !status.is_success() {
            return Err(rejection(status, response).await);
        }

        // return=representation answers with the stored rows as an array.
        let rows: Vec<ExperienceRecord> =
            response.json().await.map_err(|e| StarlogError::Store {
                message: format!("failed to decode insert response: {e}"),
                source: Some(Box::new(e)),
            })?;
        rows.into_iter().next().ok_or_else(|| StarlogError::Store {
            message: "store returned no row for the insert".into(),
            source: None,
        })
    }

    /// Two attempts at most: the full column list, then the required-only
    /// list. A second failure is the caller's to degrade on.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<ExperienceRecord>, StarlogError> {
        let first = self.select(&EXPERIENCES_PLAN.full_columns(), filter).await;
        match first {
            Ok(rows) => Ok(rows),
            Err(error) if EXPERIENCES_PLAN.has_optional() => {
                warn!(error = %error, "select rejected, retrying without optional columns");
                self.select(&EXPERIENCES_PLAN.required_columns(), filter)
                    .await
            }
            Err(error) => Err(error),
        }
    }

    async fn subscribe_inserts(&self) -> Result<InsertStream, StarlogError> {
        realtime::subscribe(self.realtime_url.clone()).await
    }

    async fn current_user(&self) -> Result<Option<StoreIdentity>, StarlogError> {
        let Some(token) = &self.access_token else {
            return Ok(None);
        };

        let url = format!("{}/user", self.auth_base);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StarlogError::Store {
                message: format!("auth request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // An expired or revoked token means anonymous, not an error.
            debug!(status = %status, "access token not accepted, treating session as anonymous");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(rejection(status, response).await);
        }

        let user: AuthUser = response.json().await.map_err(|e| StarlogError::Store {
            message: format!("failed to decode auth response: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(Some(StoreIdentity {
            id: user.id,
            email: user.email,
        }))
    }

    async fn health_check(&self) -> Result<HealthStatus, StarlogError> {
        let url = format!("{}/{EXPERIENCES_TABLE}", self.rest_base);
        let response = self
            .client
            .get(&url)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(response) => {
                let status = response.status();
                let error = rejection(status, response).await;
                Ok(HealthStatus::Unhealthy(error.user_message()))
            }
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "endpoint unreachable: {e}"
            ))),
        }
    }
}

/// Maps an error response to a store error carrying the backend's own
/// message verbatim when the body parses, and the raw body otherwise.
async fn rejection(status: StatusCode, response: Response) -> StarlogError {
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(error) => error.message,
        Err(_) => format!("store returned {status}: {body}"),
    };
    StarlogError::Store {
        message,
        source: None,
    }
}

/// Derives the realtime websocket endpoint from the HTTP base.
fn realtime_endpoint(base: &str, anon_key: &str) -> String {
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{ws_base}/realtime/v1/websocket?apikey={anon_key}&vsn=1.0.0")
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use starlog_core::normalize;

    use super::*;

    fn test_store(base_url: &str) -> SupabaseStore {
        SupabaseStore::new(&SupabaseConfig {
            url: Some(base_url.to_string()),
            anon_key: Some("test-anon-key".into()),
            access_token: None,
        })
        .unwrap()
    }

    fn test_record() -> NewExperience {
        NewExperience {
            title: "동아리 발표".into(),
            activity_on: normalize("2024.03.05").unwrap(),
            description: Some("발표 준비와 진행".into()),
            strengths: vec!["협업".into(), "프레젠테이션".into()],
            star_s: Some("s".into()),
            star_t: None,
            star_a: None,
            star_r: None,
            scope: starlog_core::Scope::InSchool,
        }
    }

    fn stored_row(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "title": "동아리 발표",
            "activity_on": "2024-03-05",
            "description": "발표 준비와 진행",
            "strengths": ["협업", "프레젠테이션"],
            "star_s": "s",
            "scope": "교내",
            "created_at": "2024-03-05T10:00:00+00:00"
        })
    }

    #[tokio::test]
    async fn insert_posts_the_payload_and_returns_the_stored_row() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/experiences"))
            .and(header("apikey", "test-anon-key"))
            .and(header("authorization", "Bearer test-anon-key"))
            .and(header("Prefer", "return=representation"))
            .and(body_partial_json(json!({
                "title": "동아리 발표",
                "activity_on": "2024-03-05",
                "scope": "교내"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([stored_row(42)])))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let row = store.insert(&test_record()).await.unwrap();
        assert_eq!(row.id, 42);
        assert_eq!(row.scope.as_deref(), Some("교내"));
    }

    #[tokio::test]
    async fn insert_rejection_surfaces_the_backend_message_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/experiences"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": "42501",
                "message": "new row violates row-level security policy for table \"experiences\"",
            })))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let error = store.insert(&test_record()).await.unwrap_err();
        assert_eq!(
            error.user_message(),
            "new row violates row-level security policy for table \"experiences\""
        );
    }

    #[tokio::test]
    async fn list_selects_all_columns_newest_first() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/experiences"))
            .and(query_param("select", EXPERIENCES_PLAN.full_columns()))
            .and(query_param("order", "activity_on.desc,id.desc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([stored_row(2), stored_row(1)])),
            )
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let rows = store.list(&ListFilter::default()).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 2);
    }

    #[tokio::test]
    async fn list_retries_without_optional_columns_when_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/experiences"))
            .and(query_param("select", EXPERIENCES_PLAN.full_columns()))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "42703",
                "message": "column experiences.scope does not exist"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/experiences"))
            .and(query_param("select", EXPERIENCES_PLAN.required_columns()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 5,
                "title": "과거 기록",
                "activity_on": "2023-11-02"
            }])))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let rows = store.list(&ListFilter::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scope, None);
    }

    #[tokio::test]
    async fn list_gives_up_after_the_second_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/experiences"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "message": "unexpected error"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let error = store.list(&ListFilter::default()).await.unwrap_err();
        assert_eq!(error.user_message(), "unexpected error");
    }

    #[tokio::test]
    async fn list_applies_the_user_filter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/experiences"))
            .and(query_param("user_id", "eq.9f3a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        let rows = store.list(&ListFilter::for_user("9f3a")).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn current_user_is_anonymous_without_a_token() {
        let store = test_store("https://abc.supabase.co");
        assert_eq!(store.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn current_user_resolves_the_session_identity() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", "Bearer user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "9f3a",
                "email": "student@school.kr"
            })))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&SupabaseConfig {
            url: Some(server.uri()),
            anon_key: Some("test-anon-key".into()),
            access_token: Some("user-token".into()),
        })
        .unwrap();

        let identity = store.current_user().await.unwrap().unwrap();
        assert_eq!(identity.id, "9f3a");
        assert_eq!(identity.email.as_deref(), Some("student@school.kr"));
    }

    #[tokio::test]
    async fn rejected_tokens_mean_anonymous_not_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "invalid JWT"
            })))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&SupabaseConfig {
            url: Some(server.uri()),
            anon_key: Some("test-anon-key".into()),
            access_token: Some("stale-token".into()),
        })
        .unwrap();

        assert_eq!(store.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn health_check_reports_reachable_stores_healthy() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/experiences"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_reports_rejections_unhealthy() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/experiences"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "relation \"public.experiences\" does not exist"
            })))
            .mount(&server)
            .await;

        let store = test_store(&server.uri());
        match store.health_check().await.unwrap() {
            HealthStatus::Unhealthy(reason) => {
                assert!(reason.contains("does not exist"), "got: {reason}");
            }
            other => panic!("expected unhealthy, got {other:?}"),
        }
    }

    #[test]
    fn missing_credentials_fail_construction() {
        let error = SupabaseStore::new(&SupabaseConfig::default()).unwrap_err();
        assert!(matches!(error, StarlogError::Config(_)));
    }

    #[test]
    fn realtime_endpoint_swaps_the_scheme_and_carries_the_key() {
        assert_eq!(
            realtime_endpoint("https://abc.supabase.co", "key"),
            "wss://abc.supabase.co/realtime/v1/websocket?apikey=key&vsn=1.0.0"
        );
        assert_eq!(
            realtime_endpoint("http://127.0.0.1:54321", "key"),
            "ws://127.0.0.1:54321/realtime/v1/websocket?apikey=key&vsn=1.0.0"
        );
    }

    #[test]
    fn trailing_slashes_on_the_endpoint_are_tolerated() {
        let store = test_store("https://abc.supabase.co/");
        assert!(store.realtime_url().starts_with("wss://abc.supabase.co/realtime"));
    }
}
