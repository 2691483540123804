// src/health/checker.rs
use super::result::display_value;
use super::{CheckError, HealthCheckResult};
use crate::config::SmokeConfig;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

/// Status line, headers and body of a response, before any validation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Sends one GET to `<base_url><path>` and classifies the answer.
pub struct HealthChecker {
    client: Client,
    url: String,
    required_field: String,
    timeout: Duration,
}

impl HealthChecker {
    pub fn new(base_url: &str, config: &SmokeConfig) -> Result<Self, CheckError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| CheckError::Unknown(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.endpoint(base_url),
            required_field: config.required_field.clone(),
            timeout: config.timeout(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run the probe. Never fails: every error ends up in the result.
    pub async fn check(&self) -> HealthCheckResult {
        let start = Instant::now();
        debug!(url = %self.url, timeout = ?self.timeout, "Sending health probe");

        let outcome = timeout(self.timeout, self.fetch()).await;
        let elapsed = start.elapsed();

        let mut result = match outcome {
            Ok(Ok(response)) => evaluate_response(&self.url, response, &self.required_field),
            Ok(Err(e)) => HealthCheckResult::failed(&self.url, e),
            Err(_) => HealthCheckResult::failed(
                &self.url,
                CheckError::Transport(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs()
                )),
            ),
        };
        result.elapsed = Some(elapsed);

        match &result.failure {
            None => debug!(
                url = %self.url,
                elapsed_ms = elapsed.as_millis() as u64,
                "Backend health check passed"
            ),
            Some(e) => warn!(
                url = %self.url,
                kind = e.kind(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Backend health check failed: {}",
                e
            ),
        }

        result
    }

    async fn fetch(&self) -> Result<RawResponse, CheckError> {
        let response = self.client.get(self.url.as_str()).send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await.map_err(CheckError::from_body)?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Apply the validation sequence to a received response. Stops at the first
/// failing step: status, then JSON, then the required field.
pub fn evaluate_response(
    url: &str,
    response: RawResponse,
    required_field: &str,
) -> HealthCheckResult {
    let mut result = HealthCheckResult {
        url: url.to_string(),
        status_code: Some(response.status),
        headers: response.headers,
        ..HealthCheckResult::default()
    };

    if response.status != 200 {
        result.failure = Some(CheckError::UnexpectedStatus(response.status));
        result.body = Some(response.body);
        return result;
    }

    let json: Value = match serde_json::from_str(&response.body) {
        Ok(json) => json,
        Err(e) => {
            result.failure = Some(e.into());
            result.body = Some(response.body);
            return result;
        }
    };
    result.is_json = true;
    result.body = Some(response.body);

    // Arrays and scalars have no keys, so they fail the field check too.
    if let Value::Object(map) = &json {
        result.available_fields = map.keys().cloned().collect();
        if let Some(value) = map.get(required_field) {
            result.has_message_field = true;
            result.message = Some(display_value(value));
        }
    }

    if !result.has_message_field {
        result.failure = Some(CheckError::Schema {
            field: required_field.to_string(),
            available: result.available_fields.clone(),
        });
    }

    result.json = Some(json);
    result
}
