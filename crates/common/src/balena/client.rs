use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::balena::config::BalenaConfig;
use crate::domain::{
    DomainError, DomainResult, FleetDevice, FleetDirectory, FleetService, Scope,
};

/// Fleet Directory implementation over the balena API v6 OData surface.
pub struct BalenaClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Response envelope used by the balena resource endpoints.
#[derive(Debug, Deserialize)]
struct PineResponse<T> {
    d: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct DeviceRecord {
    id: u64,
    uuid: String,
    belongs_to__application: Vec<ApplicationRef>,
}

#[derive(Debug, Deserialize)]
struct ApplicationRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ServiceRecord {
    id: u64,
    service_name: String,
}

#[derive(Debug, Deserialize)]
struct VarRecord {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ServiceInstallRecord {
    id: u64,
}

impl BalenaClient {
    pub fn new(config: BalenaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/v6/{}", self.api_url, resource)
    }

    async fn get_records<T>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> DomainResult<PineResponse<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(self.resource_url(resource))
            .query(query)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Fleet API request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Unexpected(anyhow!(
                "Fleet API returned {} for {}: {}",
                status,
                resource,
                body
            )));
        }

        Ok(response
            .json::<PineResponse<T>>()
            .await
            .context("Failed to decode fleet API response")?)
    }

    /// Create-or-update a variable record matching `filter`.
    ///
    /// The balena variable resources have no single upsert call, so an
    /// existing record is patched and a missing one is created.
    async fn upsert_var(
        &self,
        resource: &str,
        filter: &str,
        create_body: serde_json::Value,
        value: &str,
    ) -> DomainResult<()> {
        let existing: PineResponse<VarRecord> = self
            .get_records(resource, &[("$filter", filter), ("$select", "id")])
            .await?;

        let response = if let Some(var) = existing.d.first() {
            self.http
                .patch(format!("{}({})", self.resource_url(resource), var.id))
                .bearer_auth(&self.api_key)
                .json(&serde_json::json!({ "value": value }))
                .send()
                .await
        } else {
            self.http
                .post(self.resource_url(resource))
                .bearer_auth(&self.api_key)
                .json(&create_body)
                .send()
                .await
        }
        .context("Fleet API variable write failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Unexpected(anyhow!(
                "Fleet API variable write returned {}: {}",
                status,
                body
            )));
        }
        Ok(())
    }

    /// Resolve the install record linking a device to one of its services.
    async fn service_install_id(&self, device_id: u64, service_id: u64) -> DomainResult<u64> {
        let filter = format!(
            "device eq {} and installs__service eq {}",
            device_id, service_id
        );
        let records: PineResponse<ServiceInstallRecord> = self
            .get_records(
                "service_install",
                &[("$filter", filter.as_str()), ("$select", "id")],
            )
            .await?;

        records
            .d
            .into_iter()
            .next()
            .map(|record| record.id)
            .ok_or_else(|| {
                DomainError::Unexpected(anyhow!(
                    "No service install for device {} and service {}",
                    device_id,
                    service_id
                ))
            })
    }
}

#[async_trait]
impl FleetDirectory for BalenaClient {
    #[instrument(skip(self))]
    async fn authenticate(&self) -> DomainResult<()> {
        let response = self
            .http
            .get(format!("{}/user/v1/whoami", self.api_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Fleet API login request failed")?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DomainError::AuthFailure(
                "Fleet API rejected the configured credential".to_string(),
            )),
            status => Err(DomainError::Unexpected(anyhow!(
                "Fleet API login returned {}",
                status
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn get_device(&self, handle: &str) -> DomainResult<FleetDevice> {
        let filter = format!("uuid eq '{}'", handle);
        let query = [
            ("$filter", filter.as_str()),
            ("$select", "id,uuid"),
            ("$expand", "belongs_to__application($select=id)"),
        ];
        let records: PineResponse<DeviceRecord> = self.get_records("device", &query).await?;

        let record = records
            .d
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::DeviceNotFound(handle.to_string()))?;

        let application_id = record
            .belongs_to__application
            .first()
            .map(|application| application.id)
            .ok_or_else(|| {
                DomainError::Unexpected(anyhow!("Device {} has no owning application", handle))
            })?;

        debug!(device_id = record.id, application_id, "resolved device");
        Ok(FleetDevice {
            id: record.id,
            uuid: record.uuid,
            application_id,
        })
    }

    #[instrument(skip(self))]
    async fn list_services(&self, application_id: u64) -> DomainResult<Vec<FleetService>> {
        let filter = format!("application eq {}", application_id);
        let query = [("$filter", filter.as_str()), ("$select", "id,service_name")];
        let records: PineResponse<ServiceRecord> = self.get_records("service", &query).await?;

        Ok(records
            .d
            .into_iter()
            .map(|service| FleetService {
                id: service.id,
                service_name: service.service_name,
            })
            .collect())
    }

    #[instrument(skip(self, value))]
    async fn set_config_entry(
        &self,
        device: &FleetDevice,
        scope: &Scope,
        name: &str,
        value: &str,
    ) -> DomainResult<()> {
        match scope {
            Scope::Device => {
                let filter = format!("device eq {} and name eq '{}'", device.id, name);
                self.upsert_var(
                    "device_environment_variable",
                    &filter,
                    serde_json::json!({ "device": device.id, "name": name, "value": value }),
                    value,
                )
                .await
            }
            Scope::Service { service_id } => {
                let service_install = self.service_install_id(device.id, *service_id).await?;
                let filter = format!(
                    "service_install eq {} and name eq '{}'",
                    service_install, name
                );
                self.upsert_var(
                    "device_service_environment_variable",
                    &filter,
                    serde_json::json!({
                        "service_install": service_install,
                        "name": name,
                        "value": value
                    }),
                    value,
                )
                .await
            }
        }
    }

    #[instrument(skip(self))]
    async fn remove_config_entry(
        &self,
        device: &FleetDevice,
        scope: &Scope,
        name: &str,
    ) -> DomainResult<()> {
        let (resource, filter) = match scope {
            Scope::Device => (
                "device_environment_variable",
                format!("device eq {} and name eq '{}'", device.id, name),
            ),
            Scope::Service { service_id } => {
                let service_install = self.service_install_id(device.id, *service_id).await?;
                (
                    "device_service_environment_variable",
                    format!(
                        "service_install eq {} and name eq '{}'",
                        service_install, name
                    ),
                )
            }
        };

        let response = self
            .http
            .delete(self.resource_url(resource))
            .query(&[("$filter", filter.as_str())])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Fleet API variable delete failed")?;

        // Filtered deletes succeed whether or not a matching record existed.
        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Unexpected(anyhow!(
                "Fleet API variable delete returned {}: {}",
                status,
                body
            )));
        }
        Ok(())
    }
}
