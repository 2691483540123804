// src/health/error.rs
use std::error::Error as _;

/// Every way a smoke run can fail.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Missing or invalid settings. Raised before any request is sent.
    #[error("{0}")]
    Configuration(String),

    /// Connection refused, DNS failure, timeout.
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Expected status code 200, got {0}")]
    UnexpectedStatus(u16),

    #[error("Response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response JSON does not contain '{field}' field")]
    Schema {
        field: String,
        available: Vec<String>,
    },

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl CheckError {
    /// Stable name of the failure category, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::Configuration(_) => "ConfigurationError",
            CheckError::Transport(_) => "TransportError",
            CheckError::UnexpectedStatus(_) => "UnexpectedStatusError",
            CheckError::Parse(_) => "ParseError",
            CheckError::Schema { .. } => "SchemaError",
            CheckError::Unknown(_) => "UnknownError",
        }
    }

    /// Errors raised while reading the body. Timeouts stay transport errors,
    /// anything else is unexpected once the status line has arrived.
    pub fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            err.into()
        } else {
            CheckError::Unknown(describe(&err))
        }
    }
}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        CheckError::Transport(describe(&err))
    }
}

impl From<::config::ConfigError> for CheckError {
    fn from(err: ::config::ConfigError) -> Self {
        CheckError::Configuration(format!("Invalid configuration: {}", err))
    }
}

/// reqwest's top-level message hides the cause ("error sending request"),
/// so append the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
