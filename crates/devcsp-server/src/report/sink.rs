use async_trait::async_trait;

use devcsp_core::report::ViolationReport;

/// Operator-facing output for violation reports.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn surface(&self, report: &ViolationReport);
}

/// Logs each report as a `warn` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl ReportSink for TracingSink {
    async fn surface(&self, report: &ViolationReport) {
        tracing::warn!(
            directive = report.violated_directive().unwrap_or("-"),
            "{}",
            report.render()
        );
    }
}
