use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::ProvisioningService;
use crate::http::provision_handler::router;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Run the provisioning HTTP server until the cancellation token fires.
pub async fn run_provision_http_server(
    config: HttpServerConfig,
    service: Arc<ProvisioningService>,
    cancellation_token: CancellationToken,
) -> Result<(), anyhow::Error> {
    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, "Starting provisioning HTTP server");

    serve(listener, service, async move {
        cancellation_token.cancelled().await;
        debug!("HTTP server shutdown signal received");
    })
    .await?;

    debug!("HTTP server stopped gracefully");
    Ok(())
}

/// Serve the provisioning router on an already-bound listener.
///
/// Split out so tests can bind an ephemeral port and drive the full stack.
pub async fn serve(
    listener: TcpListener,
    service: Arc<ProvisioningService>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}
