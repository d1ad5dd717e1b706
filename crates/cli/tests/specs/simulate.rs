//! `labbable simulate` specs

use crate::prelude::*;

#[test]
fn waiters_resolve_in_order_once_initialized() {
    let assert = labbable()
        .args(["simulate", "--waiters", "3", "--attach-after", "10ms", "--init-after", "10ms"])
        .assert()
        .success();

    let stdout = stdout_of(&assert);
    let waiters: Vec<&str> = stdout
        .lines()
        .map(|line| line.split(':').next().unwrap())
        .collect();
    assert_eq!(waiters, vec!["waiter 0", "waiter 1", "waiter 2"]);
    assert!(stdout.lines().all(|line| line.contains("ready after")));
}

#[test]
fn immediate_waiters_skip_initialization() {
    labbable()
        .args(["simulate", "--immediate", "--waiters", "1", "--init-after", "never"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("waiter 0: ready after"));
}

#[test]
fn init_timeout_exits_nonzero_with_message() {
    labbable()
        .args([
            "simulate",
            "--waiters",
            "1",
            "--init-after",
            "never",
            "--timeout",
            "50ms",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Labbable timed-out after 50ms.  Did you forget to call server.initialize() or labbable.attach(server)?",
        ));
}

#[test]
fn attach_timeout_uses_attach_hint() {
    labbable()
        .args([
            "simulate",
            "--immediate",
            "--waiters",
            "1",
            "--attach-after",
            "never",
            "--timeout",
            "20ms",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Labbable timed-out after 20ms.  Did you forget to call labbable.attach(server)?",
        ));
}

#[test]
fn json_output_reports_each_waiter() {
    let assert = labbable()
        .args(["simulate", "--waiters", "2", "--format", "json"])
        .assert()
        .success();

    let json = json_of(&assert);
    let outcomes = json.as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["waiter"], 0);
    assert_eq!(outcomes[0]["ready"], true);
    assert!(outcomes[0].get("error").is_none());
}

#[test]
fn config_name_appears_in_timeouts() {
    let project = Project::empty();
    let path = project.config("name = \"Gate\"\ndefault_timeout = \"30ms\"\n");

    labbable()
        .arg("simulate")
        .arg("--config")
        .arg(&path)
        .args(["--waiters", "1", "--attach-after", "never", "--immediate"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Gate timed-out after 30ms."));
}

#[test]
fn refuses_to_wait_forever() {
    labbable()
        .args(["simulate", "--attach-after", "never", "--timeout", "never"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would wait forever"));
}
