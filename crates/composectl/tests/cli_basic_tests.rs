use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the caller's environment and config
fn composectl(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("composectl").unwrap();
    cmd.env_remove("COMPOSE_TOKEN")
        .env_remove("COMPOSE_API_URL")
        .env_remove("COMPOSECTL_PROFILE")
        .env_remove("RUST_LOG")
        .arg("--config-file")
        .arg(config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("composectl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compose provisioning API"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("composectl")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("composectl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_json() {
    let dir = TempDir::new().unwrap();
    composectl(&dir)
        .args(["version", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"composectl\""));
}

#[test]
fn test_no_args_shows_help() {
    Command::cargo_bin("composectl")
        .unwrap()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    Command::cargo_bin("composectl")
        .unwrap()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_http_method() {
    let dir = TempDir::new().unwrap();
    composectl(&dir)
        .args(["api", "trace", "/deployments"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid HTTP method"));
}

#[test]
fn test_create_requires_type() {
    let dir = TempDir::new().unwrap();
    composectl(&dir)
        .args([
            "deployment",
            "create",
            "--account-id",
            "a1",
            "--name",
            "orders",
            "--datacenter",
            "aws:us-east-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--type"));
}

#[test]
fn test_no_profile_reports_setup_tips() {
    let dir = TempDir::new().unwrap();
    composectl(&dir)
        .args(["deployment", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No profile configured"))
        .stderr(predicate::str::contains("composectl profile set"));
}

#[test]
fn test_profile_lifecycle() {
    let dir = TempDir::new().unwrap();

    composectl(&dir)
        .args(["profile", "set", "prod", "--token", "token-abcdef123456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'prod' created."));

    composectl(&dir)
        .args(["profile", "show", "prod", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****3456"))
        .stdout(predicate::str::contains("token-abcdef123456").not());

    composectl(&dir)
        .args(["profile", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"default\": true"));

    composectl(&dir)
        .args(["profile", "remove", "prod", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    composectl(&dir)
        .args(["profile", "show", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'prod' not found"));
}

#[test]
fn test_profile_path_uses_config_file() {
    let dir = TempDir::new().unwrap();
    composectl(&dir)
        .args(["profile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_completions_bash() {
    Command::cargo_bin("composectl")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("composectl"));
}
