// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the hosted backend's REST surface.

use serde::Deserialize;

/// Error body returned by the PostgREST layer.
///
/// `message` is what the backend actually said and is surfaced verbatim on
/// the write path.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgrestError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Response body of the auth `user` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgrest_error_decodes_with_partial_fields() {
        let err: PostgrestError = serde_json::from_str(
            r#"{"message":"column experiences.scope does not exist","code":"42703"}"#,
        )
        .unwrap();
        assert_eq!(err.message, "column experiences.scope does not exist");
        assert_eq!(err.code.as_deref(), Some("42703"));
        assert_eq!(err.hint, None);
    }

    #[test]
    fn auth_user_decodes_without_email() {
        let user: AuthUser = serde_json::from_str(r#"{"id":"9f3a"}"#).unwrap();
        assert_eq!(user.id, "9f3a");
        assert_eq!(user.email, None);
    }
}
