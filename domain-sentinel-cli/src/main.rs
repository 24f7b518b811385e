//! Domain Sentinel entry point.
//!
//! Loads the configuration, then checks each configured domain in order:
//! query the registration expiration over WHOIS, print the status line and,
//! when the remaining validity drops below the configured threshold, invoke
//! the external notification program. Per-domain failures are reported and
//! skipped; only a configuration load failure exits non-zero.

mod settings;

use std::path::Path;
use std::process::ExitCode;

use chrono::Local;
use domain_sentinel_core::{check_domain, dispatch, CheckConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration file read when no path argument is given.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout is reserved for per-domain status lines.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match settings::load(Path::new(&path)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration from {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "Checking {} domain(s), threshold {} day(s), delivery {}",
        config.domains.len(),
        config.days,
        config.method
    );

    run(&config).await;
    ExitCode::SUCCESS
}

/// The sequential per-domain loop. Never aborts: every failure is printed
/// and the next domain is checked.
async fn run(config: &CheckConfig) {
    let now = Local::now().naive_local();

    for domain in &config.domains {
        let expiry = match check_domain(domain, now).await {
            Ok(expiry) => expiry,
            Err(e) => {
                if e.is_expected() {
                    tracing::warn!("Check failed for {domain}: {e}");
                } else {
                    tracing::error!("Check failed for {domain}: {e}");
                }
                println!("Failed to query expiration for {domain}: {e}");
                continue;
            }
        };

        let message = expiry.notice_message();
        println!("{message}");

        if !expiry.needs_notice(config.days) {
            continue;
        }

        match dispatch(&config.external, &message, config.method, &config.args_template).await {
            Ok(outcome) if outcome.success => {
                println!(
                    "Notification via {} succeeded: {}",
                    outcome.program,
                    outcome.stdout.trim()
                );
            }
            Ok(outcome) => {
                let code = outcome
                    .exit_code
                    .map_or_else(|| "killed by signal".to_string(), |c| format!("exit {c}"));
                println!(
                    "Notification via {} failed ({code}): {}",
                    outcome.program,
                    outcome.stderr.trim()
                );
            }
            Err(e) => {
                tracing::error!("Dispatch failed for {domain}: {e}");
                println!("Failed to run {}: {e}", config.external);
            }
        }
    }
}
