//! End-to-end runs of the binary against a stand-in `osascript`.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

/// Write an executable shell script that stands in for `osascript`. The
/// script text arrives as `$2` (after `-e`) and is saved next to it.
fn fake_osascript(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("osascript");
    let script = format!(
        "#!/bin/sh\nprintf '%s' \"$2\" > \"{}\"\n{body}\n",
        dir.join("last_script.txt").display()
    );
    fs::write(&path, script).expect("write fake osascript");
    let mut perms = fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod");
    path
}

fn things(dir: &TempDir, program: &Path) -> Command {
    let config = dir.path().join("config.toml");
    fs::write(&config, format!("osascript = \"{}\"\n", program.display()))
        .expect("write config");

    let mut cmd = Command::cargo_bin("things").expect("binary");
    cmd.env_remove("THINGS_OSASCRIPT")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn last_script(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("last_script.txt")).expect("script recorded")
}

#[test]
fn add_returns_created_id_as_json() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(dir.path(), "printf 'abc123\\n'");

    let output = things(&dir, &program)
        .args(["add", "My Task", "--when", "today", "--tags", "A,B", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success(), "{output:?}");

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["schema_version"], "things.v1");
    assert_eq!(json["command"], "add");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["id"], "abc123");
    assert_eq!(json["data"]["name"], "My Task");

    let script = last_script(&dir);
    assert!(script.contains("tag names:\"A,B\""), "{script}");
    assert!(script.contains("move newTodo to list \"Today\""), "{script}");
}

#[test]
fn missing_todo_exits_with_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(
        dir.path(),
        "echo 'execution error: Things3 got an error: Can’t get to do id \"nope\". (-1728)' >&2\nexit 1",
    );

    things(&dir, &program)
        .args(["show", "nope"])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("Todo not found"));
}

#[test]
fn json_errors_go_to_stdout_with_kind() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(
        dir.path(),
        "echo 'execution error: Things3 got an error: Application isn’t running. (-600)' >&2\nexit 1",
    );

    let output = things(&dir, &program)
        .args(["today", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(4));

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["status"], "error");
    assert_eq!(json["command"], "today");
    assert_eq!(json["error"]["kind"], "operation_failed");
    assert!(json["error"]["details"]["stderr"]
        .as_str()
        .expect("stderr detail")
        .contains("Application isn’t running"));
}

#[test]
fn list_decodes_rows() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(
        dir.path(),
        "printf 'id-1|||Buy milk|||open|||errands|||missing value|||||||||Home|||~~~id-2||||||open||||||||||||||||||'",
    );

    let output = things(&dir, &program)
        .args(["today", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success(), "{output:?}");

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["data"]["total"], 1);
    let todo = &json["data"]["todos"][0];
    assert_eq!(todo["id"], "id-1");
    assert_eq!(todo["tags"], "errands");
    assert_eq!(todo["deadline"], Value::Null);
    assert_eq!(todo["project"], "Home");
    assert_eq!(todo["area"], Value::Null);
    assert!(last_script(&dir).contains("to dos of list \"Today\""));
}

#[test]
fn usage_errors_do_not_run_osascript() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(dir.path(), "printf 'should-not-run'");

    things(&dir, &program)
        .args(["add", "Task", "--when", "inbox"])
        .assert()
        .failure()
        .code(2);

    things(&dir, &program)
        .args(["edit", "id-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No changes specified"));

    assert!(!dir.path().join("last_script.txt").exists());
}

#[test]
fn human_output_lists_todos() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(
        dir.path(),
        "printf 'id-1|||Buy milk|||open||||||||||||||||||'",
    );

    things(&dir, &program)
        .arg("inbox")
        .assert()
        .success()
        .stdout(contains("Inbox: 1 todo(s)"))
        .stdout(contains("- id-1  Buy milk"));
}

#[test]
fn missing_program_is_an_operation_failure() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("no-such-osascript");

    things(&dir, &missing)
        .arg("tags")
        .assert()
        .failure()
        .code(4);
}

#[test]
fn unknown_list_name_is_a_usage_error() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(dir.path(), "printf ''");

    let output = things(&dir, &program)
        .args(["list", "later", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["error"]["kind"], "user_error");
    assert_eq!(json["error"]["details"]["list"], "later");
    assert!(!dir.path().join("last_script.txt").exists());
}

#[test]
fn list_by_name_is_case_insensitive() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(dir.path(), "printf ''");

    things(&dir, &program)
        .args(["list", "someDAY", "--limit", "3"])
        .assert()
        .success()
        .stdout(contains("Someday: 0 todo(s)"));

    let script = last_script(&dir);
    assert!(script.contains("to dos of list \"Someday\""), "{script}");
    assert!(script.contains("set maxItems to 3"), "{script}");
}

#[test]
fn json_error_names_project_subcommand_after_config_flag() {
    let dir = TempDir::new().expect("tempdir");
    let program = fake_osascript(
        dir.path(),
        "echo 'execution error: Things3 got an error: Can’t get project 1 whose name = \"Nope\". (-1719)' >&2\nexit 1",
    );

    let output = things(&dir, &program)
        .args(["project", "show", "Nope", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(3));

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["command"], "project show");
    assert_eq!(json["error"]["kind"], "not_found");
}
