// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The submission validator for the add-experience form.
//!
//! Checks run in a fixed order and stop at the first failure; each failure
//! is a blocking user-facing message shown next to the form, never logged
//! and never fatal.

use thiserror::Error;

use crate::date::normalize;
use crate::record::{NewExperience, Scope};
use crate::strength::StrengthSelection;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// A rejected submission, with the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("경험 활동을 입력해주세요.")]
    TitleRequired,
    #[error("경험 활동은 100자 이내로 입력해주세요.")]
    TitleTooLong,
    #[error("날짜를 입력해주세요.")]
    DateRequired,
    #[error("날짜는 YYYY.MM.DD 형식으로 입력해주세요.")]
    DateFormat,
    #[error("교내/교외 구분을 선택해주세요.")]
    ScopeRequired,
    #[error("강점은 최대 3개까지 선택할 수 있습니다.")]
    TooManyStrengths,
}

/// The raw form fields as submitted, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceDraft {
    pub title: String,
    pub date: String,
    pub description: String,
    pub scope: Option<String>,
    pub strengths: Vec<String>,
    pub star_s: String,
    pub star_t: String,
    pub star_a: String,
    pub star_r: String,
}

/// Validates a draft and assembles the insert payload.
///
/// Check order: title present, title length, date present, date shape,
/// scope chosen, strength count. The first failure wins. The title is
/// validated against its trimmed form but stored exactly as entered.
pub fn validate(draft: &ExperienceDraft) -> Result<NewExperience, ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if draft.title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    if draft.date.trim().is_empty() {
        return Err(ValidationError::DateRequired);
    }
    let activity_on = normalize(&draft.date).ok_or(ValidationError::DateFormat)?;
    let scope = draft
        .scope
        .as_deref()
        .and_then(Scope::parse)
        .ok_or(ValidationError::ScopeRequired)?;
    if draft.strengths.len() > StrengthSelection::MAX_SELECTED {
        return Err(ValidationError::TooManyStrengths);
    }
    let strengths = StrengthSelection::from_submitted(&draft.strengths).into_labels();

    Ok(NewExperience {
        title: draft.title.clone(),
        activity_on,
        description: optional_text(&draft.description),
        strengths,
        star_s: optional_text(&draft.star_s),
        star_t: optional_text(&draft.star_t),
        star_a: optional_text(&draft.star_a),
        star_r: optional_text(&draft.star_r),
        scope,
    })
}

/// Empty and whitespace-only inputs become `None`; anything else is kept
/// as entered.
fn optional_text(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
