//! Integration tests for the command-line surface.

mod common;

use common::token_expiring_in;
use frest::auth::ACCESS_TOKEN_KEY;
use frest::cli::{parse_args, run_cli_command, CliCommand, CredentialArgs};
use frest::config::SessionConfig;
use serde_json::json;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn args(list: &[&str]) -> impl Iterator<Item = String> {
    let mut full = vec!["frest".to_string()];
    full.extend(list.iter().map(|a| a.to_string()));
    full.into_iter()
}

fn read_storage(dir: &TempDir) -> serde_json::Value {
    let raw = fs::read_to_string(dir.path().join("storage.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_parse_login_command() {
    assert_eq!(
        parse_args(args(&["login", "--email", "a@b.com", "-p", "x"])).unwrap(),
        CliCommand::Login(CredentialArgs {
            email: "a@b.com".to_string(),
            password: Some("x".to_string()),
        })
    );
}

#[tokio::test]
async fn test_login_command_persists_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t1" })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = SessionConfig::new()
        .with_api_base_url(server.uri())
        .with_storage_path(dir.path().join("storage.json"));

    let command = parse_args(args(&["login", "--email", "a@b.com", "--password", "x"])).unwrap();
    let output = run_cli_command(command, &config).await.unwrap();

    assert_eq!(output, "Logged in as a@b.com");
    assert_eq!(read_storage(&dir)[ACCESS_TOKEN_KEY], "t1");
}

#[tokio::test]
async fn test_status_then_logout() {
    let dir = TempDir::new().unwrap();
    let storage_path = dir.path().join("storage.json");
    fs::write(
        &storage_path,
        json!({ "access_token": token_expiring_in(600) }).to_string(),
    )
    .unwrap();
    let config = SessionConfig::new().with_storage_path(&storage_path);

    let status = run_cli_command(CliCommand::Status, &config).await.unwrap();
    assert_eq!(status, "authenticated");

    let logout = run_cli_command(CliCommand::Logout, &config).await.unwrap();
    assert_eq!(logout, "Logged out");
    assert!(!storage_path.exists());

    let status = run_cli_command(CliCommand::Status, &config).await.unwrap();
    assert_eq!(status, "not authenticated");
}

#[tokio::test]
#[serial]
async fn test_config_from_env() {
    let dir = TempDir::new().unwrap();
    let storage_path = dir.path().join("env-storage.json");
    std::env::set_var("FREST_STORAGE_PATH", &storage_path);
    std::env::set_var("FREST_API_URL", "http://127.0.0.1:5999/");
    std::env::set_var("FREST_DEBOUNCE_MS", "100");

    let config = SessionConfig::from_env();

    std::env::remove_var("FREST_STORAGE_PATH");
    std::env::remove_var("FREST_API_URL");
    std::env::remove_var("FREST_DEBOUNCE_MS");

    assert_eq!(config.storage_path, storage_path);
    assert_eq!(config.api_base_url, "http://127.0.0.1:5999");
    assert_eq!(config.debounce.as_millis(), 100);
}
