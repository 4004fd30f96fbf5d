// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display-only rendering rules for stored rows.
//!
//! Everything here derives table-cell text from a row without ever feeding
//! back into the data model. In particular the scope fallback is a labeled
//! heuristic for legacy rows, not a guarantee about the data.

use crate::date::dotted_display;
use crate::record::{ExperienceRecord, Scope};

/// Shown in the scope cell when nothing better is known.
pub const SCOPE_PLACEHOLDER: &str = "—";

/// Shown in a STAR cell when the field is empty.
pub const EMPTY_FIELD: &str = "-";

/// The scope cell for a row.
///
/// Stored value verbatim when present; otherwise a keyword guess against
/// the title; otherwise the placeholder. Heuristic display only — the
/// guessed value is never written back.
pub fn scope_display(record: &ExperienceRecord) -> String {
    if let Some(scope) = record.scope.as_deref() {
        if !scope.is_empty() {
            return scope.to_string();
        }
    }
    match guess_scope_from_title(&record.title) {
        Some(scope) => scope.as_str().to_string(),
        None => SCOPE_PLACEHOLDER.to_string(),
    }
}

/// Guesses a scope from title keywords. "교내" wins over "교외" when both
/// appear, matching first-keyword-found order.
pub fn guess_scope_from_title(title: &str) -> Option<Scope> {
    if title.contains("교내") {
        Some(Scope::InSchool)
    } else if title.contains("교외") {
        Some(Scope::OutOfSchool)
    } else {
        None
    }
}

/// The strengths cell: tags joined with ", ", or an empty string when the
/// row has none. Deliberately not "-"; an empty tag list is ordinary.
pub fn strengths_display(strengths: Option<&[String]>) -> String {
    match strengths {
        Some(tags) => tags.join(", "),
        None => String::new(),
    }
}

/// A STAR cell: the value as stored, or "-" when empty or absent.
pub fn star_display(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => EMPTY_FIELD,
    }
}

/// The date cell: ISO stored form rendered dotted, empty when absent.
pub fn date_display(activity_on: Option<&str>) -> String {
    activity_on.map(dotted_display).unwrap_or_default()
}
