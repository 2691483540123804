// src/health/mod.rs
mod checker;
mod error;
mod result;

pub use checker::{evaluate_response, HealthChecker, RawResponse};
pub use error::CheckError;
pub use result::HealthCheckResult;
