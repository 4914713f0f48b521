use crate::domain::key_material::DeviceKeyMaterial;
use crate::domain::registry_id::RegistryDeviceId;

/// Config entry written with the base64-encoded private key.
pub const VAR_PRIVATE_KEY: &str = "GCP_PRIVATE_KEY";
/// Config entry pointing at the device's full registry client path.
pub const VAR_CLIENT_PATH: &str = "GCP_CLIENT_PATH";
/// Config entry with the device's telemetry topic root.
pub const VAR_DATA_TOPIC_ROOT: &str = "GCP_DATA_TOPIC_ROOT";
/// Config entry with the registry's project identifier.
pub const VAR_PROJECT_ID: &str = "GCP_PROJECT_ID";

/// The fixed four-entry configuration set derived for one device identity.
///
/// Written in full on provision and removed in full on deprovision, one
/// sequential call per entry. Earlier writes are not rolled back when a
/// later one fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntrySet {
    entries: [(&'static str, String); 4],
}

impl ConfigEntrySet {
    pub fn new(
        registry_device_id: &RegistryDeviceId,
        registry_path: &str,
        project_id: &str,
        key_material: &DeviceKeyMaterial,
    ) -> Self {
        Self {
            entries: [
                (VAR_PRIVATE_KEY, key_material.private_key_base64()),
                (
                    VAR_CLIENT_PATH,
                    format!("{}/devices/{}", registry_path, registry_device_id),
                ),
                (
                    VAR_DATA_TOPIC_ROOT,
                    format!("/devices/{}", registry_device_id),
                ),
                (VAR_PROJECT_ID, project_id.to_string()),
            ],
        }
    }

    /// Entry names in write order, also used for removal.
    pub fn names() -> [&'static str; 4] {
        [
            VAR_PRIVATE_KEY,
            VAR_CLIENT_PATH,
            VAR_DATA_TOPIC_ROOT,
            VAR_PROJECT_ID,
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }
}
