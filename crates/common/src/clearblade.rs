mod client;
mod config;
mod credentials;

pub use client::ClearBladeRegistry;
pub use config::RegistryConfig;
pub use credentials::ServiceAccountCredentials;
