/// Snapshot of a fleet device, valid for the duration of one workflow run.
/// Simple String/u64 fields for now - can evolve to newtypes later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetDevice {
    /// Numeric fleet identifier, used for service-scoped variables.
    pub id: u64,
    /// Opaque device handle (uuid) the request arrived with.
    pub uuid: String,
    /// Identifier of the owning application.
    pub application_id: u64,
}

/// A service belonging to a device's owning application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetService {
    pub id: u64,
    pub service_name: String,
}

/// Configuration scope resolved once per request and applied to all
/// config entries of that request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Device-level configuration entries.
    Device,
    /// Entries scoped to a single service on the device.
    Service { service_id: u64 },
}
