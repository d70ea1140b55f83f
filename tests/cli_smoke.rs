use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn things_help_works() {
    Command::cargo_bin("things")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Things 3"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "inbox", "today", "tomorrow", "upcoming", "anytime", "someday", "logbook", "trash", "list",
        "add", "show", "edit", "complete", "cancel", "delete", "search", "projects", "project",
        "tags",
    ];

    for cmd in subcommands {
        Command::cargo_bin("things")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn project_subcommand_help_works() {
    for cmd in ["show", "add", "edit", "complete", "delete"] {
        Command::cargo_bin("things")
            .expect("binary")
            .args(["project", cmd, "--help"])
            .assert()
            .success();
    }
}

#[test]
fn missing_title_is_a_usage_error() {
    Command::cargo_bin("things")
        .expect("binary")
        .arg("add")
        .assert()
        .failure()
        .code(2);
}
