//! Violation report payload.
//!
//! Reports are opaque: whatever JSON the browser posted is kept as-is and only
//! rendered for the operator. Nothing here validates the report shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label printed ahead of every surfaced report.
pub const VIOLATION_LABEL: &str = "Content Security Policy violation:";

/// A parsed violation report body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationReport(Value);

impl ViolationReport {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// Report standing in for a body we did not parse.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Parse a raw request body. An empty body becomes `{}`; a body that is not
    /// JSON is kept as a JSON string of its (lossy UTF-8) text.
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::empty();
        }
        match serde_json::from_slice(body) {
            Ok(v) => Self(v),
            Err(e) => {
                tracing::debug!(error = %e, "violation report is not JSON; forwarding raw body");
                Self(Value::String(String::from_utf8_lossy(body).into_owned()))
            }
        }
    }

    pub fn body(&self) -> &Value {
        &self.0
    }

    /// `violated-directive` of a `{"csp-report": {...}}` body, if present.
    pub fn violated_directive(&self) -> Option<&str> {
        self.0
            .get("csp-report")
            .and_then(|r| r.get("violated-directive"))
            .and_then(Value::as_str)
    }

    /// Labeled, human-readable rendering (two-space indented JSON).
    pub fn render(&self) -> String {
        let pretty = serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string());
        format!("{VIOLATION_LABEL}\n\n{pretty}")
    }
}
