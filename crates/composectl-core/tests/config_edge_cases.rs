use std::fs;
use std::path::PathBuf;

use composectl_core::config::{Config, Profile};
use composectl_core::{CoreError, client_for_profile};
use tempfile::TempDir;

#[test]
fn load_from_nonexistent_path_returns_default_config() {
    let path = PathBuf::from("/tmp/composectl-test-nonexistent/does/not/exist/config.toml");
    assert!(!path.exists());

    let config = Config::load_from_path(&path).expect("missing file is an empty config");

    assert!(config.profiles.is_empty());
    assert!(config.default_profile.is_none());
}

#[test]
fn load_empty_config_file_returns_default_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "").unwrap();

    let config = Config::load_from_path(&config_path).expect("empty file parses as default");
    assert!(config.profiles.is_empty());
}

#[test]
fn load_corrupt_toml_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[[[broken").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("parse"), "error should mention parsing: {msg}");
}

#[test]
fn load_profile_missing_token_returns_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[profiles.broken]
api_url = "https://api.compose.io/2016-07"
"#,
    )
    .unwrap();

    assert!(Config::load_from_path(&config_path).is_err());
}

#[test]
fn load_config_with_unknown_fields_ignores_them() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
unknown_top_level_key = "hello"

[profiles.prod]
api_token = "tok"
color = "blue"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).expect("unknown fields are ignored");
    assert!(config.profiles.contains_key("prod"));
}

#[test]
fn save_then_load_round_trips_through_nested_dirs() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("deeper").join("config.toml");

    let mut config = Config::default();
    config.set_profile(
        "dev".to_string(),
        Profile::new("dev-token").with_api_url("http://localhost:8080/2016-07"),
    );
    config.default_profile = Some("dev".to_string());
    config.save_to_path(&config_path).unwrap();

    let loaded = Config::load_from_path(&config_path).unwrap();
    assert_eq!(loaded.default_profile.as_deref(), Some("dev"));
    assert_eq!(
        loaded.get_profile("dev").unwrap().api_url,
        "http://localhost:8080/2016-07"
    );
}

#[test]
fn client_for_profile_uses_stored_credentials() {
    let mut config = Config::default();
    config.set_profile(
        "dev".to_string(),
        Profile::new("dev-token").with_api_url("http://localhost:8080/2016-07/"),
    );

    let client = client_for_profile(&config, None, false).unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080/2016-07");
}

#[test]
fn client_for_profile_unknown_name() {
    let mut config = Config::default();
    config.set_profile("dev".to_string(), Profile::new("dev-token"));

    let err = client_for_profile(&config, Some("prod"), false).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn client_for_profile_without_profiles_or_env() {
    let err = client_for_profile(&Config::default(), None, false).unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
fn client_for_profile_rejects_empty_token() {
    let mut config = Config::default();
    config.set_profile("dev".to_string(), Profile::new(""));

    let err = client_for_profile(&config, Some("dev"), false).unwrap_err();
    assert!(err.is_unauthorized());
}
