use std::sync::Arc;

use common::domain::{DomainError, FleetDevice, FleetService};
use common::{MockDeviceRegistry, MockFleetDirectory};
use provision_api::domain::ProvisioningService;
use provision_api::http::serve;
use reqwest::StatusCode;
use serde_json::json;

const REGISTRY_PATH: &str = "projects/test-project/locations/us-central1/registries/fleet";

fn test_device() -> FleetDevice {
    FleetDevice {
        id: 42,
        uuid: "abc123".to_string(),
        application_id: 7,
    }
}

fn fleet_resolving_device() -> MockFleetDirectory {
    let mut mock = MockFleetDirectory::new();
    mock.expect_authenticate().returning(|| Ok(()));
    mock.expect_get_device().returning(|_| Ok(test_device()));
    mock
}

/// Bind an ephemeral listener, run the full HTTP stack against the given
/// mocks, and hand back the base URL plus the shutdown sender.
async fn spawn_server(
    fleet: MockFleetDirectory,
    registry: MockDeviceRegistry,
) -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");

    let service = Arc::new(ProvisioningService::new(
        Arc::new(fleet),
        Arc::new(registry),
    ));

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = serve(listener, service, async move {
            let _ = rx.await;
        })
        .await;
    });

    (format!("http://{}", addr), tx)
}

#[tokio::test]
async fn test_create_device_returns_201() {
    let mut fleet = fleet_resolving_device();
    fleet
        .expect_set_config_entry()
        .times(4)
        .returning(|_, _, _, _| Ok(()));

    let mut registry = MockDeviceRegistry::new();
    registry
        .expect_registry_path()
        .return_const(REGISTRY_PATH.to_owned());
    registry
        .expect_project_id()
        .return_const("test-project".to_owned());
    registry
        .expect_create_device()
        .withf(|id, _| id.as_str() == "balena-abc123")
        .times(1)
        .returning(|_, _| Ok(()));

    let (base, shutdown) = spawn_server(fleet, registry).await;

    let response = reqwest::Client::new()
        .post(format!("{}/provision", base))
        .json(&json!({ "device": "abc123" }))
        .send()
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.text().await.expect("body"), "device created");
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_delete_after_external_removal_returns_200() {
    let mut fleet = fleet_resolving_device();
    fleet
        .expect_remove_config_entry()
        .times(4)
        .returning(|_, _, _| Ok(()));

    let mut registry = MockDeviceRegistry::new();
    registry
        .expect_delete_device()
        .times(1)
        .returning(|id| Err(DomainError::RegistryDeviceNotFound(id.to_string())));

    let (base, shutdown) = spawn_server(fleet, registry).await;

    let response = reqwest::Client::new()
        .delete(format!("{}/provision", base))
        .json(&json!({ "device": "abc123" }))
        .send()
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("body"), "device deleted");
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_missing_body_returns_400() {
    let (base, shutdown) =
        spawn_server(MockFleetDirectory::new(), MockDeviceRegistry::new()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/provision", base))
        .send()
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_body_without_device_returns_400() {
    let (base, shutdown) =
        spawn_server(MockFleetDirectory::new(), MockDeviceRegistry::new()).await;

    for method in ["POST", "DELETE"] {
        let client = reqwest::Client::new();
        let request = match method {
            "POST" => client.post(format!("{}/provision", base)),
            _ => client.delete(format!("{}/provision", base)),
        };
        let response = request
            .json(&json!({}))
            .send()
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_unknown_service_returns_400() {
    let mut fleet = fleet_resolving_device();
    fleet.expect_list_services().times(1).returning(|_| {
        Ok(vec![
            FleetService {
                id: 3,
                service_name: "main".to_string(),
            },
            FleetService {
                id: 9,
                service_name: "worker".to_string(),
            },
        ])
    });

    let (base, shutdown) = spawn_server(fleet, MockDeviceRegistry::new()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/provision", base))
        .json(&json!({ "device": "abc123", "service": "ghost" }))
        .send()
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_registry_failure_returns_500() {
    let fleet = fleet_resolving_device();

    let mut registry = MockDeviceRegistry::new();
    registry
        .expect_create_device()
        .times(1)
        .returning(|id, _| Err(DomainError::RegistryDeviceAlreadyExists(id.to_string())));
    registry
        .expect_registry_path()
        .return_const(REGISTRY_PATH.to_owned());
    registry
        .expect_project_id()
        .return_const("test-project".to_owned());

    let (base, shutdown) = spawn_server(fleet, registry).await;

    let response = reqwest::Client::new()
        .post(format!("{}/provision", base))
        .json(&json!({ "device": "abc123" }))
        .send()
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_unroutable_method_returns_405() {
    let (base, shutdown) =
        spawn_server(MockFleetDirectory::new(), MockDeviceRegistry::new()).await;

    let response = reqwest::Client::new()
        .get(format!("{}/provision", base))
        .send()
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_health_endpoint() {
    let (base, shutdown) =
        spawn_server(MockFleetDirectory::new(), MockDeviceRegistry::new()).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["status"], "healthy");
    let _ = shutdown.send(());
}
