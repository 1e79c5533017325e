//! Violation-report ingestion.
//!
//! `POST /csp-report` accepts whatever the browser sends, hands the parsed
//! body to the configured `ReportSink`, and always acknowledges with
//! `{"status":"ok"}`.

pub mod ingest;
pub mod sink;

pub use ingest::csp_report;
pub use sink::{ReportSink, TracingSink};
