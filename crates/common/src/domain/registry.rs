use crate::domain::registry_id::RegistryDeviceId;
use crate::domain::result::DomainResult;
use async_trait::async_trait;

/// Capability interface over the IoT device registry.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DeviceRegistry: Send + Sync {
    /// Fully qualified registry path
    /// (`projects/{project}/locations/{region}/registries/{registry}`).
    fn registry_path(&self) -> &str;

    /// Project identifier of the registry, embedded in derived config.
    fn project_id(&self) -> &str;

    /// Create a device identity with an ES256 public-key credential.
    ///
    /// Existence is not pre-checked; an already-present identity surfaces
    /// as `RegistryDeviceAlreadyExists`.
    async fn create_device(
        &self,
        device_id: &RegistryDeviceId,
        public_key_pem: &str,
    ) -> DomainResult<()>;

    /// Delete a device identity. An absent identity surfaces as
    /// `RegistryDeviceNotFound` so callers can treat the removal as
    /// idempotent.
    async fn delete_device(&self, device_id: &RegistryDeviceId) -> DomainResult<()>;
}
