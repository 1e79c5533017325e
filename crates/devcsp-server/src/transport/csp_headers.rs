//! CSP response-header middleware.
//!
//! Per request:
//! - negotiate the effective policy from the declared one
//! - run the downstream service
//! - if CSP is enabled and the policy is non-empty, drop every CSP header the
//!   response already carries (canonical and `X-` variants of both modes) and
//!   set the selected header plus its `X-` alias to the same value
//!
//! A disabled or empty policy leaves the response untouched.

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use devcsp_core::error::{CspError, Result};
use devcsp_core::policy::CspHeader;

use crate::app_state::AppState;

/// (canonical, legacy) header names for a delivery mode.
fn header_names(h: CspHeader) -> (HeaderName, HeaderName) {
    match h {
        CspHeader::Enforce => (
            header::CONTENT_SECURITY_POLICY,
            HeaderName::from_static("x-content-security-policy"),
        ),
        CspHeader::ReportOnly => (
            header::CONTENT_SECURITY_POLICY_REPORT_ONLY,
            HeaderName::from_static("x-content-security-policy-report-only"),
        ),
    }
}

/// Convert a serialized policy into a header value.
pub fn policy_header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| CspError::InvalidHeader(e.to_string()))
}

pub async fn csp_headers(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let effective = app.negotiate();
    let mut res = next.run(req).await;

    let Some((selected, value)) = effective.emission() else {
        app.metrics().csp_headers.inc(&[("outcome", "suppressed")]);
        return res;
    };

    let value = match policy_header_value(&value) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                header = %selected,
                error = %e,
                code = e.code().as_str(),
                "policy is not a valid header value; skipping"
            );
            app.metrics().csp_headers.inc(&[("outcome", "invalid")]);
            return res;
        }
    };

    let headers = res.headers_mut();
    for mode in [CspHeader::Enforce, CspHeader::ReportOnly] {
        let (canonical, legacy) = header_names(mode);
        headers.remove(canonical);
        headers.remove(legacy);
    }

    let (canonical, legacy) = header_names(selected);
    headers.insert(canonical, value.clone());
    headers.insert(legacy, value);

    app.metrics().csp_headers.inc(&[("outcome", "set")]);
    res
}
