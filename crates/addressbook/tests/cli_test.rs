//! Integration tests for the `addressbook` CLI binary.
//!
//! The address API is served by wiremock; config and data live in
//! temporary directories so tests never touch the user's real files.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `addressbook` binary with env isolation.
fn addressbook_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("addressbook");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ADDRESSBOOK_BASE_URL")
        .env_remove("ADDRESSBOOK_DATA_DIR")
        .env_remove("ADDRESSBOOK_OUTPUT")
        .env_remove("ADDRESSBOOK_TIMEOUT")
        .env_remove("ADDRESSBOOK_STORAGE__DIR")
        .env_remove("ADDRESSBOOK_STORAGE__KEY");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn one_address() -> serde_json::Value {
    json!({
        "details": [{
            "street": "Dorpsstraat",
            "city": "Aalsmeer",
            "postcode": "1345",
            "houseNumber": "350",
            "lat": 52.26,
            "lon": 4.76
        }]
    })
}

async fn api_with(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/getAddresses"))
        .and(query_param("postcode", "1345"))
        .and(query_param("streetnumber", "350"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_usage() {
    let home = TempDir::new().unwrap();
    let output = addressbook_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("find")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("list")),
        );
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("addressbook"));
}

#[test]
fn completions_bash_and_zsh() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("addressbook"));
    addressbook_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn find_without_base_url_fails() {
    let home = TempDir::new().unwrap();
    let output = addressbook_cmd(home.path())
        .args(["find", "--postcode", "1345", "--house-number", "350"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("No address API base URL configured"));
}

#[test]
fn config_init_then_show() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .args(["--base-url", "http://localhost:3000", "config", "init"])
        .assert()
        .success();

    addressbook_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:3000"));

    // A second init refuses to overwrite.
    addressbook_cmd(home.path())
        .args(["--base-url", "http://localhost:4000", "config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file already exists"));
}

// ── Validation (no network) ─────────────────────────────────────────

#[test]
fn blank_postcode_is_rejected() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:1"])
        .args(["find", "--postcode", " ", "--house-number", "350"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Post Code is mandatory"));
}

#[test]
fn both_blank_reports_house_number() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:1"])
        .args(["find", "--postcode", "", "--house-number", ""])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("House Number is mandatory"));
}

#[test]
fn non_numeric_input_is_rejected() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:1"])
        .args(["find", "--postcode", "12AB", "--house-number", "350"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be valid numbers"));
}

// ── Address book ────────────────────────────────────────────────────

#[test]
fn empty_book_lists_as_json_array() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .args(["--data-dir"])
        .arg(home.path().join("book"))
        .args(["list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn removing_unknown_entry_is_not_found() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .args(["--data-dir"])
        .arg(home.path().join("book"))
        .args(["remove", "0_0_1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("0_0_1"));
}

#[test]
fn clear_requires_yes_when_not_interactive() {
    let home = TempDir::new().unwrap();
    addressbook_cmd(home.path())
        .args(["--data-dir"])
        .arg(home.path().join("book"))
        .arg("clear")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));

    addressbook_cmd(home.path())
        .args(["--data-dir"])
        .arg(home.path().join("book"))
        .args(["clear", "--yes"])
        .assert()
        .success();
}

// ── Lookup against a mock API ───────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn find_lists_results() {
    let server = api_with(ResponseTemplate::new(200).set_body_json(one_address())).await;
    let home = TempDir::new().unwrap();

    addressbook_cmd(home.path())
        .args(["--base-url", &server.uri()])
        .args(["find", "-p", "1345", "-n", "350", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("52.26_4.76_350\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_then_list_and_remove() {
    let server = api_with(ResponseTemplate::new(200).set_body_json(one_address())).await;
    let home = TempDir::new().unwrap();
    let book_dir = home.path().join("book");

    addressbook_cmd(home.path())
        .args(["--base-url", &server.uri(), "--data-dir"])
        .arg(&book_dir)
        .args(["add", "-p", "1345", "-n", "350", "-f", "Ada", "-l", "Lovelace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Ada Lovelace at Dorpsstraat 350, 1345 Aalsmeer"));

    let output = addressbook_cmd(home.path())
        .args(["--data-dir"])
        .arg(&book_dir)
        .args(["list", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries[0]["id"], "52.26_4.76_350");
    assert_eq!(entries[0]["firstName"], "Ada");
    assert_eq!(entries[0]["lastName"], "Lovelace");
    assert_eq!(entries.as_array().unwrap().len(), 1);

    // Adding the same address again keeps a single entry.
    addressbook_cmd(home.path())
        .args(["--base-url", &server.uri(), "--data-dir"])
        .arg(&book_dir)
        .args(["add", "-p", "1345", "-n", "350", "-f", "Grace", "-l", "Hopper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already in the address book"));

    addressbook_cmd(home.path())
        .args(["--data-dir"])
        .arg(&book_dir)
        .args(["remove", "52.26_4.76_350"])
        .assert()
        .success();

    addressbook_cmd(home.path())
        .args(["--data-dir"])
        .arg(&book_dir)
        .args(["list", "-o", "json-compact"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_without_names_is_rejected() {
    let server = api_with(ResponseTemplate::new(200).set_body_json(one_address())).await;
    let home = TempDir::new().unwrap();

    addressbook_cmd(home.path())
        .args(["--base-url", &server.uri(), "--data-dir"])
        .arg(home.path().join("book"))
        .args(["add", "-p", "1345", "-n", "350", "-f", "Ada"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("First name and last name fields mandatory!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_maps_to_connection_exit_code() {
    let server = api_with(ResponseTemplate::new(500).set_body_string("boom")).await;
    let home = TempDir::new().unwrap();

    addressbook_cmd(home.path())
        .args(["--base-url", &server.uri()])
        .args(["find", "-p", "1345", "-n", "350"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Failed to fetch addresses"));
}
