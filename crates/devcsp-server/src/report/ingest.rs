use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde_json::json;

use devcsp_core::report::ViolationReport;

use crate::app_state::AppState;

/// Content types parsed as JSON; anything else surfaces as `{}`.
const REPORT_CONTENT_TYPES: [&str; 2] = ["application/csp-report", "application/json"];

fn is_report_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            REPORT_CONTENT_TYPES
                .iter()
                .any(|t| t.eq_ignore_ascii_case(mime))
        })
        .unwrap_or(false)
}

pub async fn csp_report(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let report = if is_report_content_type(&headers) {
        ViolationReport::from_body(&body)
    } else {
        tracing::debug!("violation report with unexpected content type; body ignored");
        ViolationReport::empty()
    };

    app.metrics().csp_reports.inc(&[]);
    app.report_sink().surface(&report).await;

    Json(json!({ "status": "ok" }))
}
