//! Help and usage specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    labbable()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn unknown_command_fails() {
    labbable()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn invalid_duration_is_reported() {
    labbable()
        .args(["simulate", "--timeout", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration 'soon'"));
}
