use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Service configuration loaded from `PROVISION_`-prefixed environment
/// variables.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // HTTP configuration
    /// HTTP server host
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    // Fleet platform configuration
    /// balena API base URL
    #[serde(default = "default_balena_api_url")]
    pub balena_api_url: String,

    /// balena API key (required)
    #[serde(default)]
    pub balena_api_key: String,

    // Registry configuration
    /// GCP project owning the device registry
    #[serde(default)]
    pub gcp_project_id: String,

    /// GCP region hosting the device registry
    #[serde(default = "default_gcp_region")]
    pub gcp_region: String,

    /// Device registry identifier
    #[serde(default)]
    pub gcp_registry_id: String,

    /// Base64-encoded ClearBlade service-account credential (required)
    #[serde(default)]
    pub cb_service_account: String,

    // OpenTelemetry configuration
    /// OpenTelemetry OTLP endpoint (gRPC)
    #[serde(default = "default_otel_endpoint")]
    pub otel_endpoint: String,

    /// Enable OpenTelemetry export
    #[serde(default = "default_otel_enabled")]
    pub otel_enabled: bool,

    /// Service name for OpenTelemetry resource
    #[serde(default = "default_otel_service_name")]
    pub otel_service_name: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

// HTTP defaults
fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

// Fleet platform defaults
fn default_balena_api_url() -> String {
    "https://api.balena-cloud.com".to_string()
}

// Registry defaults
fn default_gcp_region() -> String {
    "us-central1".to_string()
}

// OpenTelemetry defaults
fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_otel_enabled() -> bool {
    false
}

fn default_otel_service_name() -> String {
    "provision-bridge".to_string()
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("PROVISION"))
            .build()?
            .try_deserialize()
    }
}
