mod config;

use std::sync::Arc;

use common::balena::{BalenaClient, BalenaConfig};
use common::clearblade::{ClearBladeRegistry, RegistryConfig};
use common::telemetry::{init_telemetry, shutdown_telemetry, TelemetryConfig, TelemetryProviders};
use config::ServiceConfig;
use provision_api::domain::ProvisioningService;
use provision_api::http::HttpServerConfig;
use provision_api::provision_api::ProvisionApi;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize configuration and tracing
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let telemetry_providers: Option<TelemetryProviders> = match init_telemetry(&TelemetryConfig {
        service_name: config.otel_service_name.clone(),
        otel_endpoint: config.otel_endpoint.clone(),
        otel_enabled: config.otel_enabled,
        log_level: config.log_level.clone(),
    }) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Failed to initialize telemetry: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        otel_enabled = config.otel_enabled,
        http_port = config.http_port,
        "Starting provision-bridge service"
    );

    let fleet = Arc::new(BalenaClient::new(BalenaConfig {
        api_url: config.balena_api_url.clone(),
        api_key: config.balena_api_key.clone(),
    }));

    // Built once at startup and shared read-only across requests.
    let registry = match ClearBladeRegistry::new(RegistryConfig {
        project: config.gcp_project_id.clone(),
        region: config.gcp_region.clone(),
        registry: config.gcp_registry_id.clone(),
        service_account: config.cb_service_account.clone(),
    }) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            error!("Failed to initialize registry client: {}", e);
            std::process::exit(1);
        }
    };

    let service = Arc::new(ProvisioningService::new(fleet, registry));
    let api = ProvisionApi::new(
        service,
        HttpServerConfig {
            host: config.http_host.clone(),
            port: config.http_port,
        },
    );

    let shutdown_token = CancellationToken::new();

    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                signal_token.cancel();
            }
            Err(err) => {
                error!("Error setting up signal handler: {}", err);
            }
        }
    });

    // Also handle SIGTERM on Unix systems
    #[cfg(unix)]
    {
        let sigterm_token = shutdown_token.clone();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("Failed to set up SIGTERM handler");
            sigterm.recv().await;
            info!("Received SIGTERM signal");
            sigterm_token.cancel();
        });
    }

    if let Err(e) = api.run(shutdown_token).await {
        error!("HTTP server error: {:#}", e);
        shutdown_telemetry(telemetry_providers);
        std::process::exit(1);
    }

    shutdown_telemetry(telemetry_providers);
    info!("Shutdown complete");
}
