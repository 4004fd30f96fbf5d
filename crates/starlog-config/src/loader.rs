// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./starlog.toml` > `~/.config/starlog/starlog.toml`
//! > `/etc/starlog/starlog.toml` with environment variable overrides via the
//! `STARLOG_` prefix. `STARLOG_CONFIG` replaces the local file path.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::StarlogConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/starlog/starlog.toml` (system-wide)
/// 3. `~/.config/starlog/starlog.toml` (user XDG config)
/// 4. `./starlog.toml`, or the file named by `STARLOG_CONFIG`
/// 5. `STARLOG_*` environment variables
pub fn load_config() -> Result<StarlogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StarlogConfig::default()))
        .merge(Toml::file("/etc/starlog/starlog.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("starlog/starlog.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(local_config_path()))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<StarlogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StarlogConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StarlogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StarlogConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Path of the local config layer: `STARLOG_CONFIG` when set, else
/// `./starlog.toml`.
pub fn local_config_path() -> PathBuf {
    std::env::var_os("STARLOG_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("starlog.toml"))
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay intact: `STARLOG_SUPABASE_ANON_KEY` must map to
/// `supabase.anon_key`, not `supabase.anon.key`. `STARLOG_CONFIG` is a file
/// path, not a config key, and is excluded here.
fn env_provider() -> Env {
    Env::prefixed("STARLOG_").ignore(&["config"]).map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: STARLOG_SUPABASE_ANON_KEY -> "supabase_anon_key"
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("supabase_", "supabase.", 1);
        mapped.into()
    })
}
