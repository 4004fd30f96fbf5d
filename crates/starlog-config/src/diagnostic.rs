// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors into miette diagnostics with
//! valid key listings and "did you mean?" suggestions using Jaro-Winkler
//! string similarity. The dominant config source here is a pair of
//! environment variables, so diagnostics carry env var hints rather than
//! TOML source spans.

use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `anon_kye` -> `anon_key` while
/// filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic context.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(starlog::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys for the section.
        valid_keys: String,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(starlog::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// The key with the wrong type.
        key: String,
        /// Description of the type mismatch.
        detail: String,
        /// What type was expected.
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(starlog::config::missing_key),
        help("set {env_var} or add `{key}` to starlog.toml")
    )]
    MissingKey {
        /// The missing key name, dotted (e.g. `supabase.url`).
        key: String,
        /// The environment variable that supplies it.
        env_var: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(starlog::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(starlog::config::other))]
    Other(String),
}

impl ConfigError {
    /// A `MissingKey` for a dotted key, deriving its `STARLOG_*` env name.
    pub fn missing(key: &str) -> Self {
        ConfigError::MissingKey {
            key: key.to_string(),
            env_var: format!("STARLOG_{}", key.replace('.', "_").to_uppercase()),
        }
    }
}

/// Format the help message for unknown key errors.
fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may carry several underlying errors; each becomes its
/// own diagnostic, with fuzzy match suggestions for unknown field errors.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                }
            }
            Kind::MissingField(field) => ConfigError::missing(&field.clone().into_owned()),
            Kind::InvalidType(actual, expected) => {
                let key = error
                    .path
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(".");
                ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// no valid key is close enough to the unknown key.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_anon_kye_for_anon_key() {
        let valid = &["url", "anon_key", "access_token"];
        assert_eq!(suggest_key("anon_kye", valid), Some("anon_key".to_string()));
    }

    #[test]
    fn suggest_prot_for_port() {
        let valid = &["host", "port", "log_level"];
        assert_eq!(suggest_key("prot", valid), Some("port".to_string()));
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["host", "port", "log_level"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn missing_key_derives_its_env_var() {
        let err = ConfigError::missing("supabase.anon_key");
        match err {
            ConfigError::MissingKey { key, env_var } => {
                assert_eq!(key, "supabase.anon_key");
                assert_eq!(env_var, "STARLOG_SUPABASE_ANON_KEY");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
