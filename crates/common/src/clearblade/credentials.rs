use anyhow::Context;
use base64::Engine;
use serde::Deserialize;

use crate::domain::DomainResult;

/// Decoded ClearBlade service-account credential.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    /// Platform base URL, e.g. `https://iot.clearblade.com`.
    pub url: String,
    #[serde(rename = "systemKey")]
    pub system_key: String,
    /// User token presented on every registry call.
    pub token: String,
}

impl ServiceAccountCredentials {
    /// Decode the base64(JSON) blob handed to the service via configuration.
    pub fn from_base64(blob: &str) -> DomainResult<Self> {
        let raw = base64::engine::general_purpose::STANDARD
            .decode(blob.trim())
            .context("Service-account credential is not valid base64")?;
        let credentials = serde_json::from_slice(&raw)
            .context("Service-account credential is not valid JSON")?;
        Ok(credentials)
    }
}
