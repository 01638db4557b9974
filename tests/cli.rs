//! End-to-end checks of the `dlm` binary that need no network access.

use assert_cmd::Command;
use tempfile::TempDir;

fn dlm(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dlm").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env_remove("DYNALIST_TOKEN")
        .env_remove("DYNALIST_SETTINGS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_name() {
    let temp_dir = TempDir::new().unwrap();
    let output = dlm(&temp_dir).arg("version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("dlm "));
}

#[test]
fn completions_for_bash() {
    let temp_dir = TempDir::new().unwrap();
    let output = dlm(&temp_dir).args(["completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("dlm"));
}

#[test]
fn status_without_settings_exits_with_config_code() {
    let temp_dir = TempDir::new().unwrap();
    dlm(&temp_dir)
        .args(["status", "--token", "x"])
        .assert()
        .code(7);
}

#[test]
fn init_creates_settings_and_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    dlm(&temp_dir)
        .args(["init", "folder1", "--dest", "notes"])
        .assert()
        .success();

    let content = std::fs::read_to_string(temp_dir.path().join(".dynalist.json")).unwrap();
    let settings: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(settings["root"], "folder1");
    assert_eq!(settings["dest"], "notes");

    dlm(&temp_dir).args(["init", "folder2"]).assert().code(4);
    dlm(&temp_dir)
        .args(["init", "folder2", "--force"])
        .assert()
        .success();
}

#[test]
fn update_requires_root() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".dynalist.json"), "{}\n").unwrap();
    dlm(&temp_dir)
        .args(["update", "--token", "x"])
        .assert()
        .code(7);
}

#[test]
fn missing_token_reports_structured_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = dlm(&temp_dir).args(["list", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(7));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let error: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(error["error"]["code"], "CONFIG_ERROR");
}
