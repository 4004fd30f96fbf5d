// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the four pages.
//!
//! The add-experience POST is the only write. Validation failures and
//! store rejections re-render the form with the message and the entered
//! values; only a stored row redirects to the result list.

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum_extra::extract::Form;
use serde::Deserialize;

use starlog_core::{ExperienceDraft, ListFilter, validate};

use crate::pages;
use crate::server::AppState;

/// Form body for POST /addexperience.
///
/// `strengths` arrives as repeated keys, one per checked box. Every field
/// defaults so a partially filled form still deserializes and reaches the
/// validator, which owns the error messages.
#[derive(Debug, Deserialize)]
pub struct ExperienceForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub star_s: String,
    #[serde(default)]
    pub star_t: String,
    #[serde(default)]
    pub star_a: String,
    #[serde(default)]
    pub star_r: String,
}

impl ExperienceForm {
    fn into_draft(self) -> ExperienceDraft {
        ExperienceDraft {
            title: self.title,
            date: self.date,
            description: self.description,
            scope: self.scope,
            strengths: self.strengths,
            star_s: self.star_s,
            star_t: self.star_t,
            star_a: self.star_a,
            star_r: self.star_r,
        }
    }
}

/// GET /
pub async fn get_start() -> Html<String> {
    Html(pages::start_page())
}

/// GET /my-strength
pub async fn get_my_strength() -> Html<String> {
    Html(pages::my_strength_page())
}

/// GET /addexperience
pub async fn get_add_experience() -> Html<String> {
    Html(pages::add_experience_page(&ExperienceDraft::default(), None))
}

/// POST /addexperience
///
/// Validates the draft, inserts it, and redirects to /result. Both
/// failure paths re-render the form: validation failures with their fixed
/// message, store rejections with the backend message verbatim.
pub async fn post_add_experience(
    State(state): State<AppState>,
    Form(form): Form<ExperienceForm>,
) -> Result<Redirect, Html<String>> {
    let draft = form.into_draft();

    let payload = match validate(&draft) {
        Ok(payload) => payload,
        Err(err) => {
            return Err(Html(pages::add_experience_page(
                &draft,
                Some(&err.to_string()),
            )));
        }
    };

    match state.store.insert(&payload).await {
        Ok(record) => {
            tracing::debug!(id = record.id, "experience stored");
            Ok(Redirect::to("/result"))
        }
        Err(err) => {
            tracing::warn!(error = %err, "experience insert rejected");
            Err(Html(pages::add_experience_page(
                &draft,
                Some(&err.user_message()),
            )))
        }
    }
}

/// GET /result
///
/// Loads all rows, scoped to the current user when the store session
/// yields one. A failed load renders the empty list; the error is logged
/// internally and never shown on the page.
pub async fn get_result(State(state): State<AppState>) -> Html<String> {
    let filter = match state.store.current_user().await {
        Ok(Some(user)) => ListFilter::for_user(user.id),
        Ok(None) => ListFilter::default(),
        Err(err) => {
            tracing::debug!(error = %err, "session probe failed, listing without identity scope");
            ListFilter::default()
        }
    };

    let rows = match state.store.list(&filter).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(error = %err, "experience load failed, rendering empty list");
            Vec::new()
        }
    };

    Html(pages::result_page(&rows))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use starlog_core::{ExperienceRecord, StoreIdentity};
    use starlog_test_utils::MemoryStore;

    use super::*;

    fn state_over(store: &Arc<MemoryStore>) -> State<AppState> {
        State(AppState {
            store: store.clone(),
        })
    }

    fn filled_form() -> ExperienceForm {
        ExperienceForm {
            title: "동아리 발표회 진행".into(),
            date: "2024.03.05".into(),
            description: "사회 진행".into(),
            scope: Some("교내".into()),
            strengths: vec!["협업".into(), "프레젠테이션".into()],
            star_s: "준비 기간이 짧았다".into(),
            star_t: String::new(),
            star_a: String::new(),
            star_r: String::new(),
        }
    }

    fn stored_row(id: i64, title: &str, activity_on: &str) -> ExperienceRecord {
        ExperienceRecord {
            id,
            title: title.into(),
            activity_on: Some(activity_on.into()),
            description: None,
            strengths: None,
            star_s: None,
            star_t: None,
            star_a: None,
            star_r: None,
            scope: None,
            created_at: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn valid_submission_stores_and_redirects() {
        let store = Arc::new(MemoryStore::new());

        let result = post_add_experience(state_over(&store), Form(filled_form())).await;

        let response = result.unwrap().into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok()),
            Some("/result")
        );

        let records = store.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "동아리 발표회 진행");
        assert_eq!(records[0].activity_on.as_deref(), Some("2024-03-05"));
        assert_eq!(records[0].star_t, None);
    }

    #[tokio::test]
    async fn validation_failure_rerenders_without_touching_the_store() {
        let store = Arc::new(MemoryStore::new());
        let form = ExperienceForm {
            title: "   ".into(),
            ..filled_form()
        };

        let result = post_add_experience(state_over(&store), Form(form)).await;

        let Err(Html(html)) = result else {
            panic!("expected the form to re-render");
        };
        assert!(html.contains("경험 활동을 입력해주세요."));
        // The other entered values survive the round trip.
        assert!(html.contains("value=\"2024.03.05\""));
        assert!(html.contains("value=\"협업\" checked"));
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn malformed_date_gets_the_format_message() {
        let store = Arc::new(MemoryStore::new());
        let form = ExperienceForm {
            date: "2024-03-05".into(),
            ..filled_form()
        };

        let result = post_add_experience(state_over(&store), Form(form)).await;

        let Err(Html(html)) = result else {
            panic!("expected the form to re-render");
        };
        assert!(html.contains("날짜는 YYYY.MM.DD 형식으로 입력해주세요."));
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn store_rejection_shows_the_backend_message_verbatim() {
        let store = Arc::new(MemoryStore::new());
        store
            .fail_next_insert("new row violates row-level security policy for table \"experiences\"")
            .await;

        let result = post_add_experience(state_over(&store), Form(filled_form())).await;

        let Err(Html(html)) = result else {
            panic!("expected the form to re-render");
        };
        // The backend message passes through (HTML-escaped, not rephrased).
        assert!(html.contains("new row violates row-level security policy for table"));
        assert!(html.contains("value=\"동아리 발표회 진행\""));
        assert_eq!(store.insert_calls(), 1);
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn result_lists_rows_newest_first() {
        let store = Arc::new(MemoryStore::new());
        store.seed(stored_row(1, "older", "2024-01-01")).await;
        store.seed(stored_row(2, "newer", "2024-06-01")).await;

        let Html(html) = get_result(state_over(&store)).await;

        let newer = html.find("newer").unwrap();
        let older = html.find("older").unwrap();
        assert!(newer < older, "newest row should render first");
    }

    #[tokio::test]
    async fn result_scopes_to_the_current_user_when_signed_in() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_identity(Some(StoreIdentity {
                id: "me".into(),
                email: None,
            }))
            .await;
        let mut mine = stored_row(1, "내 활동", "2024-03-05");
        mine.user_id = Some("me".into());
        let mut theirs = stored_row(2, "남의 활동", "2024-03-06");
        theirs.user_id = Some("them".into());
        store.seed(mine).await;
        store.seed(theirs).await;

        let Html(html) = get_result(state_over(&store)).await;

        assert!(html.contains("내 활동"));
        assert!(!html.contains("남의 활동"));
    }

    #[tokio::test]
    async fn failed_load_renders_the_empty_list() {
        let store = Arc::new(MemoryStore::new());
        store.seed(stored_row(1, "숨겨질 행", "2024-03-05")).await;
        store.fail_lists(true);

        let Html(html) = get_result(state_over(&store)).await;

        assert!(html.contains("저장된 경험이 없습니다."));
        assert!(!html.contains("숨겨질 행"));
        // The failure is internal only; no store message reaches the page.
        assert!(!html.contains("scripted list failure"));
    }
}
