//! Effective policy negotiation.
//!
//! The declared policy is never mutated. Each call clones it and applies the
//! dev-server augmentations to the copy:
//! - live reload: allow the reload socket (`connect-src ws://host:port`) and
//!   the injected reload script (`script-src host:port`) on both loopback
//!   names the reload client may use.
//! - report-only without a declared `report-uri`: point reports at this
//!   server's `/csp-report` endpoint and allow the report POST in
//!   `connect-src`.
//!
//! Because source lists are sets, negotiating the same inputs any number of
//! times yields the same policy.

use crate::policy::{
    build_policy_string, CspHeader, Policy, SourceList, CONNECT_SRC, REPORT_URI, SCRIPT_SRC,
};

/// Path the dev server accepts violation reports on.
pub const REPORT_PATH: &str = "/csp-report";

/// Hosts the live-reload client may connect through.
pub const LIVE_RELOAD_HOSTS: [&str; 2] = ["localhost", "0.0.0.0"];

/// Dev-server parameters fixed at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeParams {
    /// Bind host of the dev server.
    pub host: String,
    /// Bind port of the dev server.
    pub port: u16,
    /// Whether live reload is enabled.
    pub live_reload: bool,
    /// Port the live-reload server listens on.
    pub live_reload_port: u16,
}

impl RuntimeParams {
    /// Host a browser can actually reach. A wildcard bind address is not
    /// dereferenceable, so `0.0.0.0` becomes `localhost`.
    pub fn public_host(&self) -> &str {
        if self.host == "0.0.0.0" {
            "localhost"
        } else {
            &self.host
        }
    }

    /// URL of this server's report endpoint.
    pub fn report_uri(&self) -> String {
        format!("http://{}:{}{}", self.public_host(), self.port, REPORT_PATH)
    }
}

/// Policy and header for one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveCsp {
    /// `None` means CSP is disabled.
    pub header: Option<CspHeader>,
    pub policy: Policy,
}

impl EffectiveCsp {
    /// Serialized policy.
    pub fn header_value(&self) -> String {
        build_policy_string(&self.policy)
    }

    /// Header and value to attach, or `None` when CSP is disabled or the
    /// policy serializes to nothing. A `None` here must leave the response
    /// headers untouched.
    pub fn emission(&self) -> Option<(CspHeader, String)> {
        let header = self.header?;
        let value = self.header_value();
        if value.is_empty() {
            return None;
        }
        Some((header, value))
    }
}

/// Compute the effective policy for one request.
pub fn negotiate(declared: &Policy, header: Option<CspHeader>, rt: &RuntimeParams) -> EffectiveCsp {
    let mut policy = declared.clone();

    if rt.live_reload {
        for host in LIVE_RELOAD_HOSTS {
            let live_reload_host = format!("{host}:{}", rt.live_reload_port);
            policy.append(CONNECT_SRC, format!("ws://{live_reload_host}"));
            policy.append(SCRIPT_SRC, live_reload_host);
        }
    }

    let report_only = header.is_some_and(CspHeader::is_report_only);
    if report_only && !policy.contains(REPORT_URI) {
        let report_uri = rt.report_uri();
        policy.append(CONNECT_SRC, report_uri.clone());
        policy.set(REPORT_URI, SourceList::parse(&report_uri));
    }

    EffectiveCsp { header, policy }
}
