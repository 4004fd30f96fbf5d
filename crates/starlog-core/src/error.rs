// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the starlog experience journal.

use thiserror::Error;

/// The primary error type used across the starlog crates.
///
/// User-input validation failures are deliberately not represented here;
/// they are blocking form messages, not infrastructure errors, and live in
/// [`crate::validate::ValidationError`].
#[derive(Debug, Error)]
pub enum StarlogError {
    /// Configuration errors (missing credentials, malformed endpoint URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote store errors (request failure, rejected query, bad response body).
    #[error("store error: {message}")]
    Store {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Realtime subscription errors (socket failure, join rejection).
    #[error("realtime error: {message}")]
    Realtime {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StarlogError {
    /// The message to show a user when this error surfaces on the write path.
    ///
    /// Store rejections pass through verbatim so the user sees what the
    /// backend actually said; everything else renders its display form.
    pub fn user_message(&self) -> String {
        match self {
            StarlogError::Store { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_surface_their_message_verbatim() {
        let err = StarlogError::Store {
            message: "duplicate key value violates unique constraint".into(),
            source: None,
        };
        assert_eq!(
            err.user_message(),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn non_store_errors_keep_their_display_prefix() {
        let err = StarlogError::Internal("oops".into());
        assert_eq!(err.user_message(), "internal error: oops");
    }

    #[test]
    fn errors_carry_optional_sources() {
        let err = StarlogError::Realtime {
            message: "socket closed".into(),
            source: Some(Box::new(std::io::Error::other("reset"))),
        };
        assert!(err.to_string().contains("socket closed"));
    }
}
