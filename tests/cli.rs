use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cms() -> Command {
    let mut cmd = Command::cargo_bin("cms-cli").expect("binary built");
    cmd.env_remove("CMS_PROFILE")
        .env_remove("CMS_CONFIG_DIR")
        .env_remove("CMS_API_KEY");
    cmd
}

#[test]
fn test_help_lists_resources() {
    cms()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cms-cli"))
        .stdout(predicate::str::contains("equation"))
        .stdout(predicate::str::contains("variant"));
}

#[test]
fn test_config_set_then_show() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_dir = dir.path().to_string_lossy().to_string();

    cms()
        .args(["--config-dir", &config_dir, "config", "set", "port", "8080"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set profile 'default' port to: 8080"));

    cms()
        .args(["--config-dir", &config_dir, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default Profile: default"))
        .stdout(predicate::str::contains("http://localhost:8080/api/v1/"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_dir = dir.path().to_string_lossy().to_string();

    cms()
        .args(["--config-dir", &config_dir, "config", "set", "colour", "blue"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown configuration key 'colour'"));

    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_invalid_create_reports_field_errors() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_dir = dir.path().to_string_lossy().to_string();

    cms()
        .args(["--config-dir", &config_dir, "tag", "create", "--data", r#"{"title":""}"#])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Tag create schema error"))
        .stderr(predicate::str::contains("title: Should not be empty"));
}

#[test]
fn test_bad_id_is_rejected_locally() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_dir = dir.path().to_string_lossy().to_string();

    cms()
        .args(["--config-dir", &config_dir, "problem", "get", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Problem id is invalid"));
}

#[test]
fn test_file_flag_only_for_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_dir = dir.path().to_string_lossy().to_string();

    cms()
        .args([
            "--config-dir",
            &config_dir,
            "equation",
            "create",
            "--data",
            "{}",
            "--file",
            "formula.png",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file is only supported"));
}

#[test]
fn test_malformed_data_argument() {
    cms()
        .args(["tag", "update", "--data", "{oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--data is not valid JSON"));
}

#[test]
fn test_zero_timeout_in_config_file_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_dir = dir.path().to_string_lossy().to_string();
    std::fs::write(
        dir.path().join("config.toml"),
        "[profiles.default]\nprotocol = \"http\"\nhost = \"localhost\"\nport = 10105\nversion = \"v1\"\ntimeout_seconds = 0\n",
    )
    .expect("write config");

    cms()
        .args(["--config-dir", &config_dir, "config", "show"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("profiles.default.timeout_seconds"));
}
