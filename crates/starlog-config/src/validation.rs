// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! The store credentials are the load-bearing check: starting without an
//! endpoint URL or anon key is a fatal configuration error, not a degraded
//! mode.

use crate::diagnostic::ConfigError;
use crate::model::StarlogConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &StarlogConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.supabase.url.as_deref().map(str::trim) {
        None | Some("") => errors.push(ConfigError::missing("supabase.url")),
        Some(url) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(ConfigError::Validation {
                    message: format!("supabase.url `{url}` must start with http:// or https://"),
                });
            }
        }
    }

    if config
        .supabase
        .anon_key
        .as_deref()
        .is_none_or(|key| key.trim().is_empty())
    {
        errors.push(ConfigError::missing("supabase.anon_key"));
    }

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be between 1 and 65535".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level `{}` is not one of: {}",
                config.server.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
