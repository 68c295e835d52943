//! Integration tests for HttpRegistryClient.
//!
//! Uses wiremock for HTTP mocking. Tests cover submit, poll, status mapping
//! (401/404/5xx) and a full sequential install through PackageInstaller.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ztools_core::{
    InstallerConfig, PackageInstaller, PackageRequest, RegistryClient, RegistryConfig,
    RegistryError, RequestHandle, RequestStatus,
};
use ztools_registry::{HttpRegistryClient, REGISTRY_USER_AGENT};

fn create_test_client(mock_server: &MockServer) -> HttpRegistryClient {
    let config = RegistryConfig::default()
        .with_url(mock_server.uri())
        .with_token("test-token");
    HttpRegistryClient::new(config).expect("failed to create client")
}

async fn mount_install(mock_server: &MockServer, package: &str, id: &str, status: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/requests"))
        .and(body_json(json!({ "package": package })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "id": id })))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/requests/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(status))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_submit_sends_identifier_and_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/requests"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("user-agent", REGISTRY_USER_AGENT))
        .and(body_json(json!({ "package": "git+https://github.com/deadwronggames/ZUtils.git" })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "id": "req-1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let handle = client
        .submit(&PackageRequest::new(
            "git+https://github.com/deadwronggames/ZUtils.git",
        ))
        .await
        .expect("submit failed");

    assert_eq!(handle, RequestHandle("req-1".to_string()));
}

#[tokio::test]
async fn test_poll_maps_statuses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/requests/p"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "pending" })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/requests/f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "status": "failure", "error": "Unable to add package" }),
        ))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let pending = client.poll(&RequestHandle("p".to_string())).await.unwrap();
    assert_eq!(pending, RequestStatus::Pending);

    let failed = client.poll(&RequestHandle("f".to_string())).await.unwrap();
    assert_eq!(
        failed,
        RequestStatus::Failure {
            message: "Unable to add package".to_string()
        }
    );
}

#[tokio::test]
async fn test_poll_unknown_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/requests/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.poll(&RequestHandle("gone".to_string())).await;

    match result {
        Err(RegistryError::RequestNotFound { request }) => assert_eq!(request, "gone"),
        other => panic!("expected RequestNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/requests"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.submit(&PackageRequest::new("com.unity.addressables")).await;

    assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_submit_missing_endpoint_is_config_error() {
    let mock_server = MockServer::start().await;

    let client = create_test_client(&mock_server);
    let result = client.submit(&PackageRequest::new("com.unity.addressables")).await;

    assert!(matches!(result, Err(RegistryError::Config { .. })));
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/requests"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "error": "package manager busy" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.submit(&PackageRequest::new("com.unity.addressables")).await;

    match result {
        Err(RegistryError::Network { message }) => {
            assert!(message.contains("503"), "{message}");
            assert!(message.contains("package manager busy"), "{message}");
        }
        other => panic!("expected Network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_status_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/requests/x"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.poll(&RequestHandle("x".to_string())).await;

    assert!(matches!(result, Err(RegistryError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_installer_over_http_continues_after_failure() {
    let mock_server = MockServer::start().await;

    mount_install(
        &mock_server,
        "A",
        "1",
        json!({ "status": "success", "package_id": "A@1.0.0" }),
    )
    .await;
    mount_install(
        &mock_server,
        "B",
        "2",
        json!({ "status": "failure", "error": "B has no compatible version" }),
    )
    .await;
    mount_install(
        &mock_server,
        "C",
        "3",
        json!({ "status": "success", "package_id": "C@0.4.1" }),
    )
    .await;

    let client = create_test_client(&mock_server);
    let config = InstallerConfig {
        poll_interval_ms: 1,
        cooldown_ms: 0,
    };
    let mut installer = PackageInstaller::new(Arc::new(client), config);

    let report = installer.install(["A", "B", "C"]).await;

    assert_eq!(report.installed().collect::<Vec<_>>(), vec!["A@1.0.0", "C@0.4.1"]);
    let failed: Vec<_> = report.failed().map(|(p, m)| (p.to_string(), m.to_string())).collect();
    assert_eq!(
        failed,
        vec![("B".to_string(), "B has no compatible version".to_string())]
    );

    let submits: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST")
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["package"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(submits, vec!["A", "B", "C"]);
}
