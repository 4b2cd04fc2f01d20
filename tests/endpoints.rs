//! End-to-end tests for the demo endpoints.

use insights_demo::config::AppConfig;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_root() {
    let service = common::start_untracked(AppConfig::default()).await;
    let res = common::client().get(service.url("/")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Hello World! Check your Azure Application Insights for logs."
    );
}

#[tokio::test]
async fn test_health_local_and_disabled() {
    let service = common::start_untracked(AppConfig::default()).await;
    let body: Value = common::client()
        .get(service.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "insights-demo");
    assert_eq!(body["environment"], "local");
    assert_eq!(body["insights_configured"], false);
}

#[tokio::test]
async fn test_health_on_app_service() {
    let mut config = AppConfig::default();
    config.deployment.site_name = Some("demo-site".into());
    let (service, _sink) = common::start_tracked(config).await;

    let body: Value = common::client()
        .get(service.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["environment"], "azure-app-service");
    assert_eq!(body["insights_configured"], true);
}

#[tokio::test]
async fn test_app_info_defaults() {
    let service = common::start_untracked(AppConfig::default()).await;
    let body: Value = common::client()
        .get(service.url("/app-info"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["app_name"], "local");
    assert_eq!(body["resource_group"], "N/A");
    assert_eq!(body["subscription_id"], "N/A");
    assert_eq!(body["region"], "N/A");
    assert_eq!(body["instance_id"], "N/A");
    assert_eq!(body["hostname"], "localhost");
    assert_eq!(body["port"], service.addr.port());
    assert_eq!(body["insights_enabled"], false);
}

#[tokio::test]
async fn test_app_info_surfaces_deployment_metadata() {
    let mut config = AppConfig::default();
    config.deployment.site_name = Some("demo-site".into());
    config.deployment.region = Some("westeurope".into());
    config.deployment.hostname = Some("demo-site.azurewebsites.net".into());
    config.deployment.instance_id = Some("abc123".into());
    let (service, sink) = common::start_tracked(config).await;

    let body: Value = common::client()
        .get(service.url("/app-info"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["app_name"], "demo-site");
    assert_eq!(body["region"], "westeurope");
    assert_eq!(body["instance_id"], "abc123");
    assert!(sink
        .records_for("insights-demo.business")
        .iter()
        .any(|r| r.message
            == "App running on: demo-site.azurewebsites.net in region: westeurope"));
}

#[tokio::test]
async fn test_log_valid_levels() {
    let service = common::start_untracked(AppConfig::default()).await;
    let client = common::client();

    for level in ["info", "WARNING", "Error"] {
        let res = client
            .post(service.url("/log"))
            .json(&json!({ "message": "hello", "level": level }))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 200);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["status"], "logged");
        assert_eq!(body["message"], "hello");
        assert_eq!(body["level"], level.to_lowercase());
    }
}

#[tokio::test]
async fn test_log_default_level() {
    let service = common::start_untracked(AppConfig::default()).await;
    let body: Value = common::client()
        .post(service.url("/log"))
        .json(&json!({ "message": "no level" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["level"], "info");
}

#[tokio::test]
async fn test_log_rejects_debug() {
    let service = common::start_untracked(AppConfig::default()).await;
    let res = common::client()
        .post(service.url("/log"))
        .json(&json!({ "message": "hello", "level": "debug" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Invalid log level"));
}

#[tokio::test]
async fn test_malformed_body_uses_detail_shape() {
    let service = common::start_untracked(AppConfig::default()).await;
    let client = common::client();

    let res = client
        .post(service.url("/log"))
        .json(&json!({ "level": "info" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);
    let body: Value = res.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("message"));

    let res = client
        .post(service.url("/user"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_create_user() {
    let service = common::start_untracked(AppConfig::default()).await;
    let res = common::client()
        .post(service.url("/user"))
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "age": 30 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["user"],
        json!({ "name": "Ada", "email": "ada@example.com", "age": 30 })
    );
    assert_eq!(body["message"], "User Ada created successfully");
}

#[tokio::test]
async fn test_create_user_negative_age() {
    let service = common::start_untracked(AppConfig::default()).await;
    let res = common::client()
        .post(service.url("/user"))
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "age": -1 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"], "Age cannot be negative");
}

#[tokio::test]
async fn test_error_demo() {
    let service = common::start_untracked(AppConfig::default()).await;
    let client = common::client();

    for _ in 0..2 {
        let res = client.get(service.url("/error-demo")).send().await.unwrap();
        assert_eq!(res.status(), 500);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["detail"], "Demo error: Division by zero");
    }

    // Still serving after the fault.
    let res = client.get(service.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_untracked_and_all_levels_payloads() {
    let service = common::start_untracked(AppConfig::default()).await;
    let client = common::client();

    let body: Value = client
        .get(service.url("/test-untracked"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["note"].as_str().unwrap().contains("only appear in console"));

    let body: Value = client
        .get(service.url("/log-all-levels"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "All log levels generated");
    assert_eq!(
        body["loggers_used"],
        json!(["insights-demo", "insights-demo.api", "insights-demo.business"])
    );
}

#[tokio::test]
async fn test_request_id_header() {
    let service = common::start_untracked(AppConfig::default()).await;
    let client = common::client();

    let res = client.get(service.url("/health")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    let res = client
        .get(service.url("/health"))
        .header("x-request-id", "fixed-id")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "fixed-id");
}
