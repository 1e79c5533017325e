#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

use devcsp_core::report::ViolationReport;
use devcsp_server::{app_state::AppState, config, report::ReportSink, router};

/// Captures surfaced reports.
#[derive(Default)]
struct MemorySink {
    reports: Mutex<Vec<ViolationReport>>,
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn surface(&self, report: &ViolationReport) {
        self.reports.lock().await.push(report.clone());
    }
}

fn app(sink: Arc<MemorySink>) -> Router {
    let cfg = config::load_from_str("version: 1\n").expect("config");
    let state = AppState::with_sink(cfg, sink).expect("state");
    router::build_router(state, Router::new())
}

async fn post_report(app: Router, content_type: &str, body: &'static str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/csp-report")
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn csp_report_is_acknowledged_and_surfaced() {
    let sink = Arc::new(MemorySink::default());
    let (status, body) = post_report(
        app(sink.clone()),
        "application/csp-report",
        r#"{"csp-report":{"violated-directive":"script-src"}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let reports = sink.reports.lock().await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].violated_directive(), Some("script-src"));
    assert!(reports[0].render().starts_with("Content Security Policy violation:\n\n"));
}

#[tokio::test]
async fn json_content_type_is_accepted() {
    let sink = Arc::new(MemorySink::default());
    let (status, _) = post_report(
        app(sink.clone()),
        "application/json; charset=utf-8",
        r#"{"csp-report":{"violated-directive":"img-src"}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(sink.reports.lock().await[0].violated_directive(), Some("img-src"));
}

#[tokio::test]
async fn malformed_report_is_still_acknowledged() {
    let sink = Arc::new(MemorySink::default());
    let (status, body) = post_report(app(sink.clone()), "application/csp-report", "{oops").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    assert_eq!(sink.reports.lock().await[0].body(), &json!("{oops"));
}

#[tokio::test]
async fn other_content_types_surface_empty_report() {
    let sink = Arc::new(MemorySink::default());
    let (status, body) = post_report(app(sink.clone()), "text/plain", "hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    assert_eq!(sink.reports.lock().await[0].body(), &json!({}));
}

#[tokio::test]
async fn report_response_carries_policy_headers() {
    let sink = Arc::new(MemorySink::default());
    let req = Request::builder()
        .method("POST")
        .uri("/csp-report")
        .header("content-type", "application/csp-report")
        .body(Body::from("{}"))
        .unwrap();
    let res = app(sink).oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("content-security-policy-report-only").is_some());
}

#[tokio::test]
async fn report_endpoint_rejects_get() {
    let sink = Arc::new(MemorySink::default());
    let req = Request::builder().uri("/csp-report").body(Body::empty()).unwrap();
    let res = app(sink.clone()).oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(sink.reports.lock().await.is_empty());
}
