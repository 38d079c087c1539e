//! Integration tests for the `odsg` CLI.
//!
//! Each test points `odsg` at a temp config directory, runs it as a
//! subprocess, and checks stdout/stderr and the files it leaves behind.
//! Nothing here needs a running content server.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Path to the built `odsg` binary.
fn odsg_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_odsg"))
}

/// Run `odsg --config <dir>/config.toml <args>` with a clean environment.
fn run_odsg(dir: &Path, args: &[&str]) -> Output {
    Command::new(odsg_bin())
        .arg("--config")
        .arg(dir.join("config.toml"))
        .args(args)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("XDG_STATE_HOME", dir)
        .env_remove("ODSG_API_URL")
        .env_remove("ODSG_PASSWORD")
        .env_remove("ODSG_LOG")
        .output()
        .expect("failed to run odsg")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn ods_lists_the_catalog() {
    let tmp = TempDir::new().unwrap();
    let out = run_odsg(tmp.path(), &["ods"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 17);
    assert!(text.lines().any(|l| l == "14 \u{2652} Vida submarina (#0A97D9)"));
    assert!(text.lines().next().unwrap().starts_with(" 1 "));
}

#[test]
fn ods_json_has_icon_names() {
    let tmp = TempDir::new().unwrap();
    let out = run_odsg(tmp.path(), &["ods", "--json"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let all = v.as_array().unwrap();
    assert_eq!(all.len(), 17);
    assert_eq!(all[1]["title"], "Hambre cero");
    assert_eq!(all[1]["icon"], "FaLeaf");
    assert_eq!(all[16]["id"], 17);
}

#[test]
fn config_set_then_show() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "# mine\n").unwrap();

    let out = run_odsg(tmp.path(), &["config", "set", "ui.card_width", "30"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "ui.card_width = 30");

    let out = run_odsg(tmp.path(), &["config", "show", "--json"]);
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["ui"]["card_width"], 30);
    assert_eq!(v["api_url"], "http://localhost:5000");

    let text = fs::read_to_string(tmp.path().join("config.toml")).unwrap();
    assert!(text.starts_with("# mine\n"));
}

#[test]
fn api_url_flag_beats_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "api_url = \"http://from-file:1\"\n",
    )
    .unwrap();
    let out = run_odsg(
        tmp.path(),
        &["config", "show", "--json", "--api-url", "http://from-flag:2"],
    );
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["api_url"], "http://from-flag:2");
}

#[test]
fn unknown_config_key_fails() {
    let tmp = TempDir::new().unwrap();
    let out = run_odsg(tmp.path(), &["config", "set", "colour", "red"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out).trim(), "error: unknown config key: colour");
}

#[test]
fn whoami_without_session() {
    let tmp = TempDir::new().unwrap();
    let out = run_odsg(tmp.path(), &["whoami"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "not logged in");

    let out = run_odsg(tmp.path(), &["whoami", "--json"]);
    assert_eq!(stdout(&out).trim(), "null");
}

#[test]
fn writes_need_a_session() {
    let tmp = TempDir::new().unwrap();
    let out = run_odsg(tmp.path(), &["section", "add", "2"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("error: not logged in"));
}

#[test]
fn unknown_ods_id_is_rejected_before_any_request() {
    let tmp = TempDir::new().unwrap();
    let out = run_odsg(tmp.path(), &["section", "add", "18"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        stderr(&out).trim(),
        "error: unknown ODS id 18 (expected 1-17)"
    );
}

#[test]
fn unreachable_server_reports_error() {
    let tmp = TempDir::new().unwrap();
    let out = run_odsg(tmp.path(), &["sections", "--api-url", "http://127.0.0.1:9"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("error: request failed"));
}

#[test]
fn login_without_password_fails() {
    let tmp = TempDir::new().unwrap();
    let out = run_odsg(tmp.path(), &["login", "--email", "a@b.org"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("ODSG_PASSWORD"));
}
