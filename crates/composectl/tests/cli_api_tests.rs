//! End-to-end tests running the binary against a mock Compose API

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "e2e-token";

/// Write a config whose only profile points at `server`
fn write_config(dir: &TempDir, server: &MockServer) -> PathBuf {
    let config_path = dir.path().join("config.toml");
    let content = format!(
        r#"default_profile = "mock"

[profiles.mock]
api_token = "{}"
api_url = "{}/2016-07"
"#,
        TOKEN,
        server.uri()
    );
    std::fs::write(&config_path, content).unwrap();
    config_path
}

/// Run composectl with `args` off the async runtime
async fn run(config_path: PathBuf, args: &[&str]) -> assert_cmd::assert::Assert {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("composectl")
            .unwrap()
            .env_remove("COMPOSE_TOKEN")
            .env_remove("COMPOSE_API_URL")
            .env_remove("COMPOSECTL_PROFILE")
            .arg("--config-file")
            .arg(&config_path)
            .args(&args)
            .assert()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_deployment_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2016-07/deployments"))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": {
                "deployments": [
                    {"id": "d1", "name": "orders", "type": "mongodb"},
                    {"id": "d2", "name": "cache", "type": "redis"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);

    run(config, &["deployment", "list", "-o", "json"])
        .await
        .success()
        .stdout(predicate::str::contains("\"orders\""))
        .stdout(predicate::str::contains("\"cache\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_deployment_list_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2016-07/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": {
                "deployments": [
                    {"id": "d1", "name": "orders", "type": "mongodb"},
                    {"id": "d2", "name": "cache", "type": "redis"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);

    run(
        config,
        &["deployment", "list", "-o", "json", "-q", "[?type=='redis'].name"],
    )
    .await
    .success()
    .stdout(predicate::str::contains("cache"))
    .stdout(predicate::str::contains("orders").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scale_sends_wrapped_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2016-07/deployments/d1/scalings"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"deployment": {"units": 3}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r9",
            "template": "Recipes::Deployment::Scale",
            "status": "running",
            "deployment_id": "d1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);

    run(config, &["deployment", "scale", "d1", "--units", "3"])
        .await
        .success()
        .stdout(predicate::str::contains("\"r9\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_prints_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2016-07/deployments/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("deployment not found"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);

    run(config, &["deployment", "get", "missing"])
        .await
        .failure()
        .code(1)
        .stderr(predicate::str::contains("deployment not found"))
        .stderr(predicate::str::contains("tip"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_prints_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2016-07/accounts"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);

    run(config, &["account", "list"])
        .await
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_raw_api_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2016-07/deployments/d1/scalings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "allocated_units": 2,
            "used_units": 1,
            "starting_units": 1,
            "minimum_units": 1
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);

    run(config, &["api", "get", "deployments/d1/scalings", "-o", "yaml"])
        .await
        .success()
        .stdout(predicate::str::contains("allocated_units: 2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_skips_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/2016-07/deployments/d1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "r2",
            "template": "Recipes::Deployment::Deprovision",
            "status": "waiting",
            "deployment_id": "d1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);

    run(config, &["deployment", "delete", "d1", "--yes"])
        .await
        .success()
        .stdout(predicate::str::contains("Deprovision"));
}
