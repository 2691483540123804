// src/report/mod.rs
//! Console report for a smoke run. Informational only, not meant to be parsed.

use crate::health::{CheckError, HealthCheckResult};
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;
const TITLE: &str = "BACKEND HEALTH CHECK TEST";
const PASS: &str = "✅";
const FAIL: &str = "❌";

pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    pub fn banner(&mut self) -> io::Result<()> {
        self.rule()?;
        writeln!(self.out, "{}", TITLE)?;
        self.rule()
    }

    pub fn target(&mut self, url: &str) -> io::Result<()> {
        writeln!(self.out, "Testing backend health at: {}", url)
    }

    /// A failure that happened before any request was made.
    pub fn failure(&mut self, err: &CheckError) -> io::Result<()> {
        writeln!(self.out, "{} {}", FAIL, err)
    }

    pub fn outcome(&mut self, result: &HealthCheckResult) -> io::Result<()> {
        if let Some(status) = result.status_code {
            writeln!(self.out, "Status Code: {}", status)?;
            writeln!(self.out, "Response Headers: {}", format_headers(&result.headers))?;
        }

        if let Some(json) = &result.json {
            writeln!(self.out, "Response JSON: {}", json)?;
        }

        match &result.failure {
            None => {
                writeln!(self.out, "{} Backend health check passed!", PASS)?;
                writeln!(self.out, "{} Status: 200", PASS)?;
                writeln!(
                    self.out,
                    "{} Valid JSON response with message: '{}'",
                    PASS,
                    result.message.as_deref().unwrap_or_default()
                )
            }
            Some(err @ (CheckError::UnexpectedStatus(_) | CheckError::Parse(_))) => {
                self.failure(err)?;
                writeln!(
                    self.out,
                    "Response text: {}",
                    result.body.as_deref().unwrap_or_default()
                )
            }
            Some(err @ CheckError::Schema { available, .. }) => {
                self.failure(err)?;
                writeln!(self.out, "Available fields: {:?}", available)
            }
            Some(err) => self.failure(err),
        }
    }

    pub fn summary(&mut self, passed: bool) -> io::Result<()> {
        self.rule()?;
        if passed {
            writeln!(self.out, "{} ALL TESTS PASSED", PASS)?;
        } else {
            writeln!(self.out, "{} TESTS FAILED", FAIL)?;
        }
        self.out.flush()
    }
}

/// Rendered as `{'name': 'value', ...}`.
fn format_headers(headers: &[(String, String)]) -> String {
    let pairs: Vec<String> = headers
        .iter()
        .map(|(name, value)| format!("'{}': '{}'", name, value))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{evaluate_response, RawResponse};

    fn render(result: &HealthCheckResult) -> String {
        let mut report = Report::new(Vec::new());
        report.outcome(result).unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: vec![("content-type".into(), "application/json".into())],
            body: body.to_string(),
        }
    }

    #[test]
    fn banner_and_summary() {
        let mut report = Report::new(Vec::new());
        report.banner().unwrap();
        report.summary(false).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();

        let rule = "=".repeat(60);
        assert_eq!(
            text,
            format!("{rule}\nBACKEND HEALTH CHECK TEST\n{rule}\n{rule}\n❌ TESTS FAILED\n")
        );
    }

    #[test]
    fn passing_result_reports_message() {
        let result = evaluate_response(
            "http://localhost:8001/api/",
            response(200, r#"{"message":"Hello World"}"#),
            "message",
        );
        let text = render(&result);
        assert!(text.contains("Status Code: 200"));
        assert!(text.contains("Response Headers: {'content-type': 'application/json'}"));
        assert!(text.contains(r#"Response JSON: {"message":"Hello World"}"#));
        assert!(text.contains("✅ Valid JSON response with message: 'Hello World'"));
    }

    #[test]
    fn bad_status_shows_raw_body() {
        let result = evaluate_response("http://h/api/", response(500, "boom"), "message");
        let text = render(&result);
        assert!(text.contains("❌ Expected status code 200, got 500"));
        assert!(text.contains("Response text: boom"));
    }

    #[test]
    fn missing_field_lists_keys() {
        let result = evaluate_response(
            "http://h/api/",
            response(200, r#"{"status":"ok"}"#),
            "message",
        );
        let text = render(&result);
        assert!(text.contains("❌ Response JSON does not contain 'message' field"));
        assert!(text.contains(r#"Available fields: ["status"]"#));
    }

    #[test]
    fn transport_failure_has_no_status_line() {
        let result = HealthCheckResult::failed(
            "http://h/api/",
            CheckError::Transport("connection refused".into()),
        );
        let text = render(&result);
        assert!(!text.contains("Status Code"));
        assert_eq!(text, "❌ Request failed: connection refused\n");
    }

    #[test]
    fn headers_use_dict_notation() {
        let headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("content-length".to_string(), "25".to_string()),
        ];
        assert_eq!(
            format_headers(&headers),
            "{'content-type': 'application/json', 'content-length': '25'}"
        );
        assert_eq!(format_headers(&[]), "{}");
    }
}
