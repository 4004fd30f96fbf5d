// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `starlog check` command implementation.
//!
//! Runs startup checks against the configured store: configuration
//! validity, one PostgREST probe, the derived realtime endpoint, and the
//! auth session state.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use starlog_config::StarlogConfig;
use starlog_core::{ExperienceStore, HealthStatus};
use starlog_supabase::SupabaseStore;

/// Status of a startup check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single startup check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

/// Runs the `starlog check` command.
///
/// Returns whether every check passed; warnings do not fail the run.
pub async fn run_check(config: &StarlogConfig, plain: bool) -> bool {
    let use_color = !plain && std::io::stdout().is_terminal();
    let mut results = Vec::new();

    results.push(check_config().await);

    match SupabaseStore::new(&config.supabase) {
        Ok(store) => {
            results.push(check_store_probe(&store).await);
            results.push(check_realtime_endpoint(&store));
            results.push(check_session(&store).await);
        }
        Err(e) => {
            results.push(CheckResult {
                name: "Store client".to_string(),
                status: CheckStatus::Fail,
                message: e.to_string(),
                duration: Duration::ZERO,
            });
        }
    }

    render_results(&results, use_color);
    all_passed(&results)
}

fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.status != CheckStatus::Fail)
}

fn render_results(results: &[CheckResult], use_color: bool) {
    println!();
    println!("  starlog check");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in results {
        let duration_ms = result.duration.as_millis();
        let line;

        match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    let symbol = "✓".green().to_string();
                    line = format!(
                        "    {symbol} {:<14} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                } else {
                    line = format!(
                        "    [OK]   {:<14} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    let symbol = "!".yellow().to_string();
                    line = format!(
                        "    {symbol} {:<14} {} ({duration_ms}ms)",
                        result.name,
                        result.message.yellow()
                    );
                } else {
                    line = format!(
                        "    [WARN] {:<14} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    let symbol = "✗".red().to_string();
                    line = format!(
                        "    {symbol} {:<14} {} ({duration_ms}ms)",
                        result.name,
                        result.message.red()
                    );
                } else {
                    line = format!(
                        "    [FAIL] {:<14} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
        }

        println!("{line}");
    }

    println!();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }

    println!();
}

/// Check configuration loads without errors.
async fn check_config() -> CheckResult {
    let start = Instant::now();
    match starlog_config::load_and_validate() {
        Ok(_) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Pass,
            message: "valid".to_string(),
            duration: start.elapsed(),
        },
        Err(errors) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Fail,
            message: format!("{} error(s)", errors.len()),
            duration: start.elapsed(),
        },
    }
}

/// Probe the PostgREST surface with one tiny select.
async fn check_store_probe(store: &SupabaseStore) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match store.health_check().await {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "reachable".to_string()),
        Ok(HealthStatus::Degraded(msg)) => (CheckStatus::Warn, msg),
        Ok(HealthStatus::Unhealthy(msg)) => (CheckStatus::Fail, msg),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "Store".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Check the realtime endpoint derived from the configured URL.
fn check_realtime_endpoint(store: &SupabaseStore) -> CheckResult {
    let start = Instant::now();
    let url = store.realtime_url();
    let (status, message) = if url.starts_with("wss://") || url.starts_with("ws://") {
        (CheckStatus::Pass, url.to_string())
    } else {
        (CheckStatus::Fail, format!("unexpected scheme: {url}"))
    };
    CheckResult {
        name: "Realtime".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Report the auth session state behind the store.
async fn check_session(store: &SupabaseStore) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match store.current_user().await {
        Ok(Some(user)) => (
            CheckStatus::Pass,
            format!("signed in as {}", user.email.unwrap_or(user.id)),
        ),
        Ok(None) => (
            CheckStatus::Warn,
            "anonymous session (reads and writes rely on anon policies)".to_string(),
        ),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "Session".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use starlog_config::SupabaseConfig;

    use super::*;

    fn offline_store() -> SupabaseStore {
        let config = SupabaseConfig {
            url: Some("https://project.supabase.co".into()),
            anon_key: Some("anon-key".into()),
            access_token: None,
        };
        SupabaseStore::new(&config).unwrap()
    }

    #[test]
    fn check_status_equality() {
        assert_eq!(CheckStatus::Pass, CheckStatus::Pass);
        assert_eq!(CheckStatus::Warn, CheckStatus::Warn);
        assert_ne!(CheckStatus::Pass, CheckStatus::Fail);
    }

    #[test]
    fn all_passed_tolerates_warnings() {
        let results = vec![
            CheckResult {
                name: "a".to_string(),
                status: CheckStatus::Pass,
                message: "ok".to_string(),
                duration: Duration::ZERO,
            },
            CheckResult {
                name: "b".to_string(),
                status: CheckStatus::Warn,
                message: "hm".to_string(),
                duration: Duration::ZERO,
            },
        ];
        assert!(all_passed(&results));
    }

    #[test]
    fn all_passed_fails_on_any_failure() {
        let results = vec![CheckResult {
            name: "a".to_string(),
            status: CheckStatus::Fail,
            message: "no".to_string(),
            duration: Duration::ZERO,
        }];
        assert!(!all_passed(&results));
    }

    #[test]
    fn realtime_endpoint_derives_a_websocket_scheme() {
        let result = check_realtime_endpoint(&offline_store());
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.message.starts_with("wss://"));
    }

    #[tokio::test]
    async fn session_without_a_token_warns_as_anonymous() {
        // No access token configured, so the probe resolves locally.
        let result = check_session(&offline_store()).await;
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.message.contains("anonymous"));
    }
}
