use thiserror::Error;

/// Closed error taxonomy for the provisioning domain.
///
/// Transport status mapping happens at the HTTP boundary only; workflow
/// code matches on variants, never on status codes.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Fleet authentication failed: {0}")]
    AuthFailure(String),

    #[error("Device not found in registry: {0}")]
    RegistryDeviceNotFound(String),

    #[error("Device already exists in registry: {0}")]
    RegistryDeviceAlreadyExists(String),

    #[error("Registry error: {0}")]
    RegistryFailure(String),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
