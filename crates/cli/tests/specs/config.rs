//! `labbable config` specs

use crate::prelude::*;

#[test]
fn shows_defaults() {
    let assert = labbable().arg("config").assert().success();
    similar_asserts::assert_eq!(
        stdout_of(&assert),
        "name:            Labbable\n\
         default_timeout: 2s\n\
         attach_hint:     labbable.attach(server)\n\
         init_hint:       server.initialize() or labbable.attach(server)\n"
    );
}

#[test]
fn reads_config_file() {
    let project = Project::empty();
    let path = project.config("name = \"Gate\"\ndefault_timeout = \"750ms\"\n");

    let assert = labbable()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .args(["--format", "json"])
        .assert()
        .success();

    let json = json_of(&assert);
    assert_eq!(json["name"], "Gate");
    assert_eq!(json["default_timeout"], "750ms");
}

#[test]
fn invalid_config_fails_with_context() {
    let project = Project::empty();
    let path = project.config("default_timeout = 12\n");

    labbable()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading config from"));
}

#[test]
fn missing_config_fails() {
    let project = Project::empty();
    let path = project.config("");
    std::fs::remove_file(&path).unwrap();

    labbable()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}
