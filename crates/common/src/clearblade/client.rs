use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, instrument};

use crate::clearblade::config::RegistryConfig;
use crate::clearblade::credentials::ServiceAccountCredentials;
use crate::domain::{DeviceRegistry, DomainError, DomainResult, RegistryDeviceId};

/// Header carrying the ClearBlade user token.
const USER_TOKEN_HEADER: &str = "ClearBlade-UserToken";

/// Device Registry implementation over the ClearBlade IoT Core REST API.
///
/// Constructed once at startup and shared read-only across requests: the
/// decoded credential and the resolved registry path never change.
pub struct ClearBladeRegistry {
    http: reqwest::Client,
    credentials: ServiceAccountCredentials,
    registry_path: String,
    project_id: String,
}

impl ClearBladeRegistry {
    pub fn new(config: RegistryConfig) -> DomainResult<Self> {
        let credentials = ServiceAccountCredentials::from_base64(&config.service_account)?;
        let registry_path = format!(
            "projects/{}/locations/{}/registries/{}",
            config.project, config.region, config.registry
        );
        debug!(registry_path = %registry_path, "Initialized registry client");

        Ok(Self {
            http: reqwest::Client::new(),
            credentials,
            registry_path,
            project_id: config.project,
        })
    }

    fn devices_url(&self) -> String {
        format!(
            "{}/api/v/4/webhook/execute/{}/cloudiot_devices",
            self.credentials.url.trim_end_matches('/'),
            self.credentials.system_key
        )
    }
}

#[async_trait]
impl DeviceRegistry for ClearBladeRegistry {
    fn registry_path(&self) -> &str {
        &self.registry_path
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    #[instrument(skip(self, public_key_pem), fields(device_id = %device_id))]
    async fn create_device(
        &self,
        device_id: &RegistryDeviceId,
        public_key_pem: &str,
    ) -> DomainResult<()> {
        let body = json!({
            "id": device_id.as_str(),
            "credentials": [{
                "publicKey": { "format": "ES256_PEM", "key": public_key_pem }
            }]
        });

        let response = self
            .http
            .post(self.devices_url())
            .query(&[("parent", self.registry_path.as_str())])
            .header(USER_TOKEN_HEADER, &self.credentials.token)
            .json(&body)
            .send()
            .await
            .context("Registry create request failed")?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(DomainError::RegistryDeviceAlreadyExists(
                device_id.to_string(),
            )),
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(DomainError::RegistryFailure(format!(
                    "create returned {}: {}",
                    status, detail
                )))
            }
        }
    }

    #[instrument(skip(self), fields(device_id = %device_id))]
    async fn delete_device(&self, device_id: &RegistryDeviceId) -> DomainResult<()> {
        let name = format!("{}/devices/{}", self.registry_path, device_id);
        let response = self
            .http
            .delete(self.devices_url())
            .query(&[("name", name.as_str())])
            .header(USER_TOKEN_HEADER, &self.credentials.token)
            .send()
            .await
            .context("Registry delete request failed")?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(DomainError::RegistryDeviceNotFound(
                device_id.to_string(),
            )),
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(DomainError::RegistryFailure(format!(
                    "delete returned {}: {}",
                    status, detail
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    fn registry() -> ClearBladeRegistry {
        let blob = base64::engine::general_purpose::STANDARD.encode(
            r#"{
                "url": "https://iot.clearblade.com/",
                "systemKey": "syskey123",
                "token": "tok456"
            }"#,
        );
        ClearBladeRegistry::new(RegistryConfig {
            project: "acme-iot".to_string(),
            region: "us-central1".to_string(),
            registry: "fleet".to_string(),
            service_account: blob,
        })
        .unwrap()
    }

    #[test]
    fn test_registry_path_is_resolved_at_construction() {
        assert_eq!(
            registry().registry_path(),
            "projects/acme-iot/locations/us-central1/registries/fleet"
        );
        assert_eq!(registry().project_id(), "acme-iot");
    }

    #[test]
    fn test_devices_url_strips_trailing_slash() {
        assert_eq!(
            registry().devices_url(),
            "https://iot.clearblade.com/api/v/4/webhook/execute/syskey123/cloudiot_devices"
        );
    }

    #[test]
    fn test_construction_fails_on_bad_credential_blob() {
        let result = ClearBladeRegistry::new(RegistryConfig {
            project: "acme-iot".to_string(),
            region: "us-central1".to_string(),
            registry: "fleet".to_string(),
            service_account: "***".to_string(),
        });
        assert!(result.is_err());
    }
}
