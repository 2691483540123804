// src/main.rs
use anyhow::Result;
use backend_smoke::{config::Overrides, report::Report, smoke};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or blank.
const DEFAULT_LOG_DIRECTIVES: &str = "backend_smoke=info,reqwest=warn";

/// Probe a backend's /api/ endpoint once and exit 0 if it answers 200 with a
/// JSON body carrying a "message" field.
#[derive(Debug, Parser)]
#[command(name = "backend-smoke", version)]
struct Cli {
    /// Settings file (YAML, JSON or TOML)
    #[arg(long, env = "SMOKE_CONFIG")]
    config: Option<PathBuf>,

    /// .env file loaded before the backend URL is resolved
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Backend base URL; overrides REACT_APP_BACKEND_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Path appended to the base URL
    #[arg(long)]
    path: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u32>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Self {
            config_file: cli.config,
            env_file: cli.env_file,
            base_url: cli.base_url,
            path: cli.path,
            timeout_secs: cli.timeout_secs,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let overrides = Overrides::from(Cli::parse());

    match run(overrides).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Unexpected error: {:#}", e);
            eprintln!("❌ Unexpected error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(overrides: Overrides) -> Result<bool> {
    // Logs go to stderr; stdout carries the report
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref())?)
        .with_writer(std::io::stderr)
        .init();

    let mut report = Report::new(std::io::stdout());
    let passed = smoke::run(&overrides, smoke::process_env, &mut report).await?;
    Ok(passed)
}

/// `RUST_LOG` replaces the defaults entirely when set.
fn log_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    let directives = match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec,
        _ => DEFAULT_LOG_DIRECTIVES,
    };
    Ok(EnvFilter::try_new(directives)?)
}
