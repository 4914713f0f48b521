use crate::domain::device::{FleetDevice, FleetService, Scope};
use crate::domain::result::DomainResult;
use async_trait::async_trait;

/// Capability interface over the fleet-management platform.
///
/// The platform owns device metadata and the per-device/per-service
/// configuration store; the workflow only reads metadata and writes or
/// removes scoped config entries.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FleetDirectory: Send + Sync {
    /// Verify the configured API credential. Performed once per invocation.
    async fn authenticate(&self) -> DomainResult<()>;

    /// Resolve a device handle to its fleet snapshot.
    async fn get_device(&self, handle: &str) -> DomainResult<FleetDevice>;

    /// List the services of an application.
    async fn list_services(&self, application_id: u64) -> DomainResult<Vec<FleetService>>;

    /// Upsert one config entry at the given scope.
    async fn set_config_entry(
        &self,
        device: &FleetDevice,
        scope: &Scope,
        name: &str,
        value: &str,
    ) -> DomainResult<()>;

    /// Remove one config entry at the given scope. Removing an absent entry
    /// is not an error.
    async fn remove_config_entry(
        &self,
        device: &FleetDevice,
        scope: &Scope,
        name: &str,
    ) -> DomainResult<()>;
}
