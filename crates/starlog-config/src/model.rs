// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for starlog.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level starlog configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with `STARLOG_`
/// environment variable overrides. The `[supabase]` credentials are the
/// only required values; everything else defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StarlogConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted backend credentials and session settings.
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

/// Hosted backend configuration.
///
/// `url` and `anon_key` have no defaults on purpose: starting without them
/// is a fatal configuration error, never a degraded mode.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SupabaseConfig {
    /// Project endpoint, e.g. `https://abc.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,

    /// Public (anon) API key sent with every request.
    #[serde(default)]
    pub anon_key: Option<String>,

    /// Optional user access token. When present, reads are scoped to the
    /// session identity it resolves to; absent means anonymous.
    #[serde(default)]
    pub access_token: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8686
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = StarlogConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8686);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.supabase.url, None);
        assert_eq!(config.supabase.anon_key, None);
        assert_eq!(config.supabase.access_token, None);
    }
}
