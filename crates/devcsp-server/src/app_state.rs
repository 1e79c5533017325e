//! Shared application state for the dev server.
//!
//! The declared config is resolved for the active environment once, at
//! construction, and never mutated afterwards. Every request negotiates its
//! effective policy from that immutable base.

use std::sync::Arc;

use devcsp_core::error::Result;
use devcsp_core::negotiate::{negotiate, EffectiveCsp, RuntimeParams};

use crate::config::{AppSection, DevServerConfig};
use crate::obs::metrics::ServerMetrics;
use crate::report::{ReportSink, TracingSink};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    sink: Arc<dyn ReportSink>,
}

struct AppStateInner {
    app: AppSection,
    runtime: RuntimeParams,
    metrics: ServerMetrics,
}

impl AppState {
    /// Build application state, surfacing reports through `tracing`.
    pub fn new(cfg: DevServerConfig) -> Result<Self> {
        Self::with_sink(cfg, Arc::new(TracingSink))
    }

    /// Build application state with a custom report sink.
    pub fn with_sink(cfg: DevServerConfig, sink: Arc<dyn ReportSink>) -> Result<Self> {
        cfg.validate()?;

        let app = cfg.resolved_app();
        let runtime = cfg.server.runtime_params();

        tracing::info!(
            environment = %cfg.server.environment,
            header = app.content_security_policy_header.map(|h| h.name()).unwrap_or("disabled"),
            directives = app.content_security_policy.len(),
            live_reload = runtime.live_reload,
            "content security policy configured"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                app,
                runtime,
                metrics: ServerMetrics::default(),
            }),
            sink,
        })
    }

    /// App section resolved for the active environment.
    pub fn app(&self) -> &AppSection {
        &self.inner.app
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.inner.metrics
    }

    pub fn report_sink(&self) -> Arc<dyn ReportSink> {
        Arc::clone(&self.sink)
    }

    /// Effective policy and header for one request, derived from a fresh copy
    /// of the declared policy.
    pub fn negotiate(&self) -> EffectiveCsp {
        negotiate(
            &self.inner.app.content_security_policy,
            self.inner.app.content_security_policy_header,
            &self.inner.runtime,
        )
    }
}
