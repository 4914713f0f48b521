pub mod balena;
pub mod clearblade;
pub mod domain;
pub mod garde;
pub mod telemetry;

// Re-export mocks when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use domain::MockDeviceRegistry;
#[cfg(any(test, feature = "testing"))]
pub use domain::MockFleetDirectory;
