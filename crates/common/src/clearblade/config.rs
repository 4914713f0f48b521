/// Settings identifying the target device registry and its credential.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// GCP project that owns the registry.
    pub project: String,
    /// GCP region hosting the registry.
    pub region: String,
    /// Registry identifier.
    pub registry: String,
    /// Base64-encoded service-account credential blob.
    pub service_account: String,
}
