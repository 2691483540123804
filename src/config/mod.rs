// src/config/mod.rs
mod models;

pub use models::*;

use crate::health::CheckError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// Prefix for environment overrides, e.g. `SMOKE_TIMEOUT_SECS=3`.
pub const ENV_PREFIX: &str = "SMOKE";

/// Settings file looked up in the working directory when `--config` is not given.
const DEFAULT_SETTINGS_NAME: &str = "backend-smoke";

/// Command line values. Each one that is set wins over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub path: Option<String>,
    pub timeout_secs: Option<u32>,
}

/// Load settings from an optional YAML/JSON/TOML file, then `SMOKE_*`
/// variables, then the command line.
///
/// `env` replaces the process environment as the source of `SMOKE_*`
/// variables when given.
pub fn load_settings(
    overrides: &Overrides,
    env: Option<::config::Map<String, String>>,
) -> Result<SmokeConfig, CheckError> {
    let builder = ::config::Config::builder();

    let builder = match &overrides.config_file {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            builder.add_source(::config::File::from(path.as_path()).required(true))
        }
        None => builder
            .add_source(::config::File::with_name(DEFAULT_SETTINGS_NAME).required(false)),
    };

    let config: SmokeConfig = builder
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        )
        .set_override_option(
            "env_file",
            overrides
                .env_file
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        )?
        .set_override_option("path", overrides.path.clone())?
        .set_override_option("timeout_secs", overrides.timeout_secs.map(i64::from))?
        .build()?
        .try_deserialize()?;

    config.validate()?;
    debug!(?config, "Settings resolved");
    Ok(config)
}

/// Load `KEY=value` pairs from `path` into the process environment.
///
/// Variables that are already set keep their value. A missing file is
/// normal; an unreadable or malformed one is logged and skipped.
pub fn load_env_file(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            info!("Loaded environment variables from {}", path.display());
            true
        }
        Err(e) if e.not_found() => {
            debug!(
                "No env file at {}, using process environment",
                path.display()
            );
            false
        }
        Err(e) => {
            warn!("Ignoring env file {}: {}", path.display(), e);
            false
        }
    }
}

/// Pick the backend base URL: command line first, then the variable named by
/// `url_var`, then `base_url` from the settings. Blank values are skipped.
pub fn resolve_base_url<F>(
    cli: Option<&str>,
    config: &SmokeConfig,
    lookup: F,
) -> Result<String, CheckError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = [
        cli.map(str::to_string),
        lookup(&config.url_var),
        config.base_url.clone(),
    ]
    .into_iter()
    .flatten()
    .map(|value| value.trim().to_string())
    .find(|value| !value.is_empty())
    .ok_or_else(|| {
        CheckError::Configuration(format!("{} not found in environment", config.url_var))
    })?;

    let parsed = Url::parse(&raw).map_err(|e| {
        CheckError::Configuration(format!("Backend URL '{}' is not valid: {}", raw, e))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CheckError::Configuration(format!(
            "Backend URL '{}' must use http or https, got '{}'",
            raw,
            parsed.scheme()
        )));
    }

    Ok(raw)
}
