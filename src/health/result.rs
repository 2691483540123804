// src/health/result.rs
use super::CheckError;
use serde_json::Value;
use std::time::Duration;

/// Outcome of one probe. Built fresh per run and never shared.
#[derive(Debug, Default)]
pub struct HealthCheckResult {
    pub url: String,
    /// Absent when the request failed before a response arrived.
    pub status_code: Option<u16>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub json: Option<Value>,
    pub is_json: bool,
    pub has_message_field: bool,
    pub message: Option<String>,
    /// Top-level keys of the JSON body; empty for non-object JSON.
    pub available_fields: Vec<String>,
    pub elapsed: Option<Duration>,
    pub failure: Option<CheckError>,
}

impl HealthCheckResult {
    pub fn failed(url: &str, failure: CheckError) -> Self {
        Self {
            url: url.to_string(),
            failure: Some(failure),
            ..Self::default()
        }
    }

    /// True only for a 200 with a JSON body holding the required field.
    pub fn passed(&self) -> bool {
        self.status_code == Some(200) && self.is_json && self.has_message_field
    }

    pub fn error(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }
}

/// Strings are shown without quotes, anything else as JSON text.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
