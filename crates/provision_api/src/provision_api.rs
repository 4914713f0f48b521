use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::ProvisioningService;
use crate::http::{run_provision_http_server, HttpServerConfig};

/// Composition root for the provisioning API module.
pub struct ProvisionApi {
    service: Arc<ProvisioningService>,
    config: HttpServerConfig,
}

impl ProvisionApi {
    pub fn new(service: Arc<ProvisioningService>, config: HttpServerConfig) -> Self {
        debug!("Initializing provisioning API module");
        Self { service, config }
    }

    /// Run the HTTP surface until the token is cancelled.
    pub async fn run(self, cancellation_token: CancellationToken) -> Result<(), anyhow::Error> {
        run_provision_http_server(self.config, self.service, cancellation_token).await
    }
}
