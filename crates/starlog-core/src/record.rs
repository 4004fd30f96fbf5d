// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The experience record in both of its wire shapes.
//!
//! Submissions use the strict [`NewExperience`] payload; rows read back from
//! the store use the tolerant [`ExperienceRecord`], which must deserialize
//! legacy rows written before optional columns existed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::date::ActivityDate;

/// Whether an activity took place in school or out of school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "교내")]
    InSchool,
    #[serde(rename = "교외")]
    OutOfSchool,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::InSchool => "교내",
            Scope::OutOfSchool => "교외",
        }
    }

    /// Parses the stored/submitted Korean label; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "교내" => Some(Scope::InSchool),
            "교외" => Some(Scope::OutOfSchool),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated submission payload, assembled only by
/// [`crate::validate::validate`].
///
/// Serializes to the insert body the store expects: empty optional fields
/// are omitted entirely rather than sent as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExperience {
    pub title: String,
    pub activity_on: ActivityDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub strengths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_s: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_t: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_r: Option<String>,
    pub scope: Scope,
}

/// A stored experience row as returned by the store.
///
/// Every column except `id` and `title` is optional so that legacy rows
/// (no `scope`, no strengths array) and realtime payloads with partial
/// column sets still decode. `scope` stays a raw string here; interpreting
/// it is display logic, not data modeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub activity_on: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub star_s: Option<String>,
    #[serde(default)]
    pub star_t: Option<String>,
    #[serde(default)]
    pub star_a: Option<String>,
    #[serde(default)]
    pub star_r: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// The authenticated identity reported by the store's session endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreIdentity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Accepts RFC 3339 timestamps and quietly drops anything else.
///
/// A malformed `created_at` must not make an otherwise healthy row
/// undisplayable.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
