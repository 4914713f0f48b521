use garde::Validate;

/// Lifecycle operation, selected by the HTTP method at the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Delete,
}

/// Incoming lifecycle request. Constructed fresh per request, never
/// persisted.
#[derive(Debug, Clone, Validate)]
pub struct ProvisionRequest {
    /// Fleet device handle.
    #[garde(length(min = 1))]
    pub device: String,
    /// Optional sub-service name. A name that does not resolve against the
    /// owning application is a validation failure, not a device-level
    /// fallback.
    #[garde(skip)]
    pub service: Option<String>,
}

/// Workflow outcome reported back to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    Deleted,
}
