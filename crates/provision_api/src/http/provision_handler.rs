use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use common::domain::{DomainError, Operation, ProvisionOutcome, ProvisionRequest};

use crate::domain::ProvisioningService;
use crate::http::error::domain_error_to_response;

/// Wire shape of the lifecycle request body.
///
/// Field presence is checked by the workflow's validator rather than by
/// serde, so a body without a device handle still reaches the domain and
/// fails there as a bad request.
#[derive(Debug, Deserialize)]
struct ProvisionBody {
    #[serde(default)]
    device: Option<String>,
    #[serde(default)]
    service: Option<String>,
}

/// Build the provisioning router.
pub fn router(service: Arc<ProvisioningService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/provision", post(create_device).delete(delete_device))
        .with_state(service)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "provision-bridge"
    }))
}

async fn create_device(
    State(service): State<Arc<ProvisioningService>>,
    body: Bytes,
) -> Response {
    run_lifecycle(service, Operation::Create, &body).await
}

async fn delete_device(
    State(service): State<Arc<ProvisioningService>>,
    body: Bytes,
) -> Response {
    run_lifecycle(service, Operation::Delete, &body).await
}

async fn run_lifecycle(
    service: Arc<ProvisioningService>,
    operation: Operation,
    body: &[u8],
) -> Response {
    let result = match parse_request(body) {
        Ok(request) => service.provision(operation, request).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(ProvisionOutcome::Created) => {
            (StatusCode::CREATED, "device created").into_response()
        }
        Ok(ProvisionOutcome::Deleted) => (StatusCode::OK, "device deleted").into_response(),
        Err(error) => {
            warn!(error = %error, "provisioning request failed");
            domain_error_to_response(error).into_response()
        }
    }
}

/// Decode the wire body. An absent or unparseable body is a validation
/// failure; a missing device handle is caught by the workflow's validator.
fn parse_request(body: &[u8]) -> Result<ProvisionRequest, DomainError> {
    if body.is_empty() {
        return Err(DomainError::BadRequest("Missing request body".to_string()));
    }

    let body: ProvisionBody = serde_json::from_slice(body)
        .map_err(|error| DomainError::BadRequest(format!("Invalid request body: {}", error)))?;

    Ok(ProvisionRequest {
        device: body.device.unwrap_or_default(),
        service: body.service,
    })
}
