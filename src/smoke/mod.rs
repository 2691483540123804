// src/smoke/mod.rs
use crate::config::{self, Overrides};
use crate::health::{CheckError, HealthChecker};
use crate::report::Report;
use std::io::{self, Write};
use tracing::info;

/// Run one smoke test and write the report to `report`.
///
/// `lookup` reads the backend URL variable; the binary passes the process
/// environment after the `.env` file has been loaded into it. Returns whether
/// every check passed. Only a failure to write the report is an error.
pub async fn run<W, F>(
    overrides: &Overrides,
    lookup: F,
    report: &mut Report<W>,
) -> io::Result<bool>
where
    W: Write,
    F: Fn(&str) -> Option<String>,
{
    report.banner()?;

    let passed = match prepare(overrides, lookup) {
        Ok(checker) => {
            report.target(checker.url())?;
            let result = checker.check().await;
            report.outcome(&result)?;
            result.passed()
        }
        Err(e) => {
            info!(kind = e.kind(), "Smoke test aborted before sending a request");
            report.failure(&e)?;
            false
        }
    };

    report.summary(passed)?;
    Ok(passed)
}

fn prepare<F>(overrides: &Overrides, lookup: F) -> Result<HealthChecker, CheckError>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = config::load_settings(overrides, None)?;
    config::load_env_file(&settings.env_file);
    let base_url = config::resolve_base_url(overrides.base_url.as_deref(), &settings, lookup)?;
    HealthChecker::new(&base_url, &settings)
}

/// Read a variable from the process environment, treating non-UTF-8 as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
