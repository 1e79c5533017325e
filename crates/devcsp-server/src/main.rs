//! devcsp dev server.
//!
//! - Serves `server.root` with the negotiated CSP attached to every response
//! - `POST /csp-report` surfaces violation reports in the log
//! - Graceful shutdown on Ctrl+C / SIGTERM

use axum::Router;
use tower_http::services::ServeDir;
use tracing_subscriber::{fmt, EnvFilter};

use devcsp_core::error::{CspError, Result};
use devcsp_server::{app_state, config, html, router};

const CONFIG_PATH: &str = "devcsp.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code().as_str(), "devcsp-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_file(CONFIG_PATH)?;
    let host = cfg.server.host.clone();
    let port = cfg.server.port;
    let root = cfg.server.root.clone();

    let state = app_state::AppState::new(cfg)?;

    if let Some(tag) = html::content_for(html::ContentSection::Head, state.app()) {
        tracing::info!(%tag, "meta policy for the document head");
    }

    let static_files = Router::new().fallback_service(ServeDir::new(&root));
    let app = router::build_router(state, static_files);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| CspError::Internal(format!("failed to bind {host}:{port}: {e}")))?;

    tracing::info!(%host, port, %root, "devcsp-server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CspError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
