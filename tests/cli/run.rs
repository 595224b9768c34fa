//! Tests for `mystiko run` paths that stop before contacting the store.

use crate::support::*;

#[test]
fn test_run_requires_command() {
    let t = Test::with_fixture("mystiko.json");

    let output = t.cmd().args(["run", "test"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no command specified");
}

#[cfg(feature = "aws")]
#[test]
fn test_run_unknown_environment_fails_before_fetch() {
    let t = Test::with_fixture("mystiko.json");

    let output = t
        .cmd()
        .args(["run", "prod", "--", "true"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "environment 'prod' is not defined");
    assert!(!t.path("test_gen_files").exists());
}

#[cfg(feature = "aws")]
#[test]
fn test_run_invalid_config_fails_before_fetch() {
    let t = Test::with_fixture("mystiko_invalid_target.json");

    let output = t
        .cmd()
        .args(["run", "test", "--", "true"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "schema validation failed");
}
