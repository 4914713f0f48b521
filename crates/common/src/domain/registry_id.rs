use std::fmt;

/// Prefix applied to fleet device handles to form registry identities.
pub const REGISTRY_DEVICE_ID_PREFIX: &str = "balena-";

/// Identity key for a device within the IoT registry.
///
/// Derived deterministically from the fleet device handle, so it is never
/// stored; both workflows re-derive it per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryDeviceId(String);

impl RegistryDeviceId {
    pub fn from_handle(handle: &str) -> Self {
        Self(format!("{}{}", REGISTRY_DEVICE_ID_PREFIX, handle))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistryDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
