//! Smoke tests for the appfw CLI
//!
//! These run the binary end to end on commands that need no Appium server.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the appfw binary
fn appfw() -> Command {
    let mut cmd = Command::cargo_bin("appfw").expect("appfw binary should exist");
    cmd.env_remove("RUST_LOG").env_remove("APPIUM_SERVER_URL");
    cmd
}

const LOCATORS: &str = r#"{
    "login_button": {
        "android_locator": {"type": "id", "value": "btn_login"},
        "ios_locator": {"type": "accessibility_id", "value": "Login"}
    }
}"#;

const SOURCE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hierarchy rotation="0">
  <android.widget.EditText class="android.widget.EditText" text="Username" resource-id="app:id/user" bounds="[60,500][1020,620]"/>
  <android.view.ViewGroup class="android.view.ViewGroup" content-desc="test-LOGIN" bounds="[60,820][1020,940]"/>
</hierarchy>"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("login_locators.json"), LOCATORS).unwrap();
    fs::write(dir.path().join("screen_source.xml"), SOURCE).unwrap();
    dir
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    appfw()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    appfw()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("locate"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("dump"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn test_no_args_shows_help() {
    appfw().assert().failure();
}

// ============================================================================
// Locate
// ============================================================================

#[test]
fn test_locate_defaults_to_android() {
    let dir = project();
    appfw()
        .current_dir(dir.path())
        .args(["locate", "--page", "login", "--name", "login_button"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"type":"id","value":"btn_login"}"#));
}

#[test]
fn test_locate_follows_config() {
    let dir = project();
    fs::write(dir.path().join("config.json"), r#"{"device_type":"ios"}"#).unwrap();
    appfw()
        .current_dir(dir.path())
        .args(["locate", "--page", "login", "--name", "login_button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accessibility_id"));
}

#[test]
fn test_locate_unknown_name_fails() {
    let dir = project();
    appfw()
        .current_dir(dir.path())
        .args(["locate", "--page", "login", "--name", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No locator found for 'missing'"));
}

#[test]
fn test_locate_missing_page_fails() {
    let dir = project();
    appfw()
        .current_dir(dir.path())
        .args(["locate", "--page", "cart", "--name", "checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Parse
// ============================================================================

#[test]
fn test_parse_writes_element_map() {
    let dir = project();
    appfw()
        .current_dir(dir.path())
        .args(["parse", "--source", "screen_source.xml"])
        .assert()
        .success();
    let text = fs::read_to_string(dir.path().join("screen_elements.json")).unwrap();
    assert!(text.contains(r#""Username": {"#));
    assert!(text.contains("//*[@resource-id='app:id/user']"));
    assert!(text.contains("//*[@content-desc='test-LOGIN']"));
}

#[test]
fn test_parse_bounds_to_custom_output() {
    let dir = project();
    appfw()
        .current_dir(dir.path())
        .args(["parse", "--source", "screen_source.xml", "--output", "b.json", "--bounds"])
        .assert()
        .success();
    let records: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("b.json")).unwrap()).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
    assert_eq!(records[1]["element_name"], "android.view.ViewGroup");
}

#[test]
fn test_parse_malformed_source_writes_empty_map() {
    let dir = project();
    fs::write(dir.path().join("bad.xml"), "<hierarchy><node></hierarchy>").unwrap();
    appfw()
        .current_dir(dir.path())
        .args(["parse", "--source", "bad.xml", "--output", "bad.json"])
        .assert()
        .success();
    let text = fs::read_to_string(dir.path().join("bad.json")).unwrap();
    assert_eq!(text.trim(), "{}");
}

#[test]
fn test_parse_missing_source_fails() {
    let dir = project();
    appfw()
        .current_dir(dir.path())
        .args(["parse", "--source", "absent.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

// ============================================================================
// Login (failures before any session is opened)
// ============================================================================

#[test]
fn test_login_without_test_data_fails() {
    let dir = project();
    appfw()
        .current_dir(dir.path())
        .args(["login", "--test", "test_login_valid_user"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("test_data.json"));
}

#[test]
fn test_login_unknown_test_fails() {
    let dir = project();
    fs::write(
        dir.path().join("test_data.json"),
        r#"{"test_login_valid_user":{"username":"u","password":"p"}}"#,
    )
    .unwrap();
    appfw()
        .current_dir(dir.path())
        .args(["login", "--test", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No test data found for test 'nope'"));
}

#[test]
fn test_login_entry_without_credentials_fails() {
    let dir = project();
    fs::write(
        dir.path().join("test_data.json"),
        r#"{"test_login_valid_user":{"username":"u","password":"p","expect_success":true},"test_search":{"query":"backpack"}}"#,
    )
    .unwrap();
    appfw()
        .current_dir(dir.path())
        .args(["login", "--test", "test_search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Test data field 'username'"));
}
