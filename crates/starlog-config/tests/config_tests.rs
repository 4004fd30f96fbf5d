// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the starlog configuration system.

use starlog_config::diagnostic::ConfigError;
use starlog_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_starlog_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
log_level = "debug"

[supabase]
url = "https://abc.supabase.co"
anon_key = "public-anon-key"
access_token = "user-token"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.supabase.url.as_deref(), Some("https://abc.supabase.co"));
    assert_eq!(config.supabase.anon_key.as_deref(), Some("public-anon-key"));
    assert_eq!(config.supabase.access_token.as_deref(), Some("user-token"));
}

/// Missing sections fall back to defaults without error at the parse stage.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty config should parse");
    assert_eq!(config.server.port, 8686);
    assert_eq!(config.supabase.url, None);
}

/// An unvalidated parse succeeds without credentials, but validation is
/// fatal: both missing credentials are reported together.
#[test]
fn validation_requires_both_credentials() {
    let errors = load_and_validate_str("").expect_err("credentials are required");
    let keys: Vec<String> = errors
        .iter()
        .filter_map(|e| match e {
            ConfigError::MissingKey { key, .. } => Some(key.clone()),
            _ => None,
        })
        .collect();
    assert!(keys.contains(&"supabase.url".to_string()));
    assert!(keys.contains(&"supabase.anon_key".to_string()));
}

/// Missing-key diagnostics point at the env var that supplies the value.
#[test]
fn missing_key_errors_name_their_env_vars() {
    let errors = load_and_validate_str("").expect_err("credentials are required");
    let env_vars: Vec<&str> = errors
        .iter()
        .filter_map(|e| match e {
            ConfigError::MissingKey { env_var, .. } => Some(env_var.as_str()),
            _ => None,
        })
        .collect();
    assert!(env_vars.contains(&"STARLOG_SUPABASE_URL"));
    assert!(env_vars.contains(&"STARLOG_SUPABASE_ANON_KEY"));
}

/// Unknown keys are rejected by `deny_unknown_fields`.
#[test]
fn unknown_field_in_supabase_produces_error() {
    let toml = r#"
[supabase]
url = "https://abc.supabase.co"
anon_kye = "oops"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("anon_kye"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// The figment bridge turns an unknown field into an UnknownKey diagnostic
/// with a typo suggestion.
#[test]
fn unknown_field_gets_a_suggestion() {
    let toml = r#"
[supabase]
url = "https://abc.supabase.co"
anon_kye = "oops"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "anon_kye" && suggestion.as_deref() == Some("anon_key")
        )
    });
    assert!(found, "expected an anon_kye -> anon_key suggestion, got: {errors:?}");
}

/// A wrong-typed value surfaces as an InvalidType diagnostic.
#[test]
fn wrong_typed_port_is_an_invalid_type_error() {
    let toml = r#"
[server]
port = "eight thousand"

[supabase]
url = "https://abc.supabase.co"
anon_key = "k"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject string port");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))),
        "expected a type error, got: {errors:?}"
    );
}

/// Semantic validation catches a bad endpoint scheme.
#[test]
fn non_http_url_fails_validation() {
    let toml = r#"
[supabase]
url = "abc.supabase.co"
anon_key = "k"
"#;

    let errors = load_and_validate_str(toml).expect_err("scheme-less URL must fail");
    assert!(
        errors
            .iter()
            .any(|e| e.to_string().contains("http:// or https://")),
        "expected a scheme complaint, got: {errors:?}"
    );
}
