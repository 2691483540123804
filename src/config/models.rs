// src/config/models.rs
use crate::health::CheckError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_URL_VAR: &str = "REACT_APP_BACKEND_URL";
pub const DEFAULT_ENV_FILE: &str = "/app/frontend/.env";
pub const DEFAULT_PATH: &str = "/api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUIRED_FIELD: &str = "message";

/// Settings for a single smoke run.
#[derive(Debug, Clone, Deserialize)]
pub struct SmokeConfig {
    /// Fallback base URL, used only when neither the CLI nor `url_var` provide one.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the backend base URL.
    #[serde(default = "default_url_var")]
    pub url_var: String,

    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Path appended to the base URL.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Key that must be present in the JSON body.
    #[serde(default = "default_required_field")]
    pub required_field: String,
}

fn default_url_var() -> String {
    DEFAULT_URL_VAR.to_string()
}

fn default_env_file() -> PathBuf {
    PathBuf::from(DEFAULT_ENV_FILE)
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_required_field() -> String {
    DEFAULT_REQUIRED_FIELD.to_string()
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            url_var: default_url_var(),
            env_file: default_env_file(),
            path: default_path(),
            timeout_secs: default_timeout_secs(),
            required_field: default_required_field(),
        }
    }
}

impl SmokeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full probe URL for `base_url`. A single trailing slash on the base is dropped.
    pub fn endpoint(&self, base_url: &str) -> String {
        let base = base_url.strip_suffix('/').unwrap_or(base_url);
        format!("{}{}", base, self.path)
    }

    pub fn validate(&self) -> Result<(), CheckError> {
        if self.timeout_secs == 0 {
            return Err(CheckError::Configuration(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        if !self.path.starts_with('/') {
            return Err(CheckError::Configuration(format!(
                "path must start with '/', got '{}'",
                self.path
            )));
        }

        if self.url_var.trim().is_empty() {
            return Err(CheckError::Configuration(
                "url_var must not be empty".to_string(),
            ));
        }

        if self.required_field.is_empty() {
            return Err(CheckError::Configuration(
                "required_field must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_probe() {
        let config = SmokeConfig::default();
        assert_eq!(config.url_var, "REACT_APP_BACKEND_URL");
        assert_eq!(config.env_file, PathBuf::from("/app/frontend/.env"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.required_field, "message");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn endpoint_appends_api_path() {
        let config = SmokeConfig::default();
        assert_eq!(
            config.endpoint("http://localhost:8001"),
            "http://localhost:8001/api/"
        );
        assert_eq!(
            config.endpoint("http://localhost:8001/"),
            "http://localhost:8001/api/"
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = SmokeConfig {
            timeout_secs: 0,
            ..SmokeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CheckError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_relative_path() {
        let config = SmokeConfig {
            path: "api/".to_string(),
            ..SmokeConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }
}
