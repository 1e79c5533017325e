//! Axum router wiring.
//!
//! Routes `POST /csp-report` and the ops endpoints, forwards everything else to
//! `downstream`, and wraps the whole stack in the CSP header middleware.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use devcsp_core::negotiate::REPORT_PATH;

use crate::{app_state::AppState, ops, report, transport};

pub fn build_router(state: AppState, downstream: Router) -> Router {
    Router::new()
        .route(REPORT_PATH, post(report::csp_report))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state.clone())
        .fallback_service(downstream)
        .layer(middleware::from_fn_with_state(
            state,
            transport::csp_headers::csp_headers,
        ))
}
