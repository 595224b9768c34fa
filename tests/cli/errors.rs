//! Error reporting of the binary.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_missing_config_suggests_flag() {
    let t = Test::new();

    t.cmd()
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read .mystiko.json"))
        .stderr(predicate::str::contains("pass --config <PATH> or set MYSTIKO_CONFIG"));
}

#[test]
fn test_invalid_json_is_reported() {
    let t = Test::new();
    std::fs::write(t.path(".mystiko.json"), "{ not json").unwrap();

    t.cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to parse .mystiko.json"));
}

#[test]
fn test_explicit_config_path() {
    let t = Test::new();
    let config = t.write_config_as(
        "custom.json",
        &serde_json::json!({
            "environments": { "dev": { "secrets": [ { "name": "a", "envname": "A" } ] } }
        }),
    );

    t.cmd()
        .arg("check")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json is valid"));
}

#[test]
fn test_plan_requires_environment() {
    let t = Test::with_fixture("mystiko.json");

    t.cmd()
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ENVIRONMENT"));
}
