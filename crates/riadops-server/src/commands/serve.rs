//! Serve command: runs the HTTP API until Ctrl-C / SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::ServerResult;
use crate::routes::router;
use crate::service::AvailabilityService;

/// Starts the HTTP server.
pub async fn run(config: &AppConfig, bind: Option<SocketAddr>) -> ServerResult<()> {
    let service = AvailabilityService::from_config(config)?;
    let app = router(Arc::new(service));

    let addr = bind.unwrap_or(config.server.bind);
    let listener = TcpListener::bind(addr).await?;

    info!(
        addr = %listener.local_addr()?,
        store = %config.store.dir.display(),
        rooms_table = %config.store.rooms_table,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
