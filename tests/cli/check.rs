//! Tests for `mystiko check`.

use crate::support::*;

#[test]
fn test_check_valid_config() {
    let t = Test::with_fixture("mystiko.json");

    let output = t.check(None);
    assert_success(&output);
    assert_stdout_contains(&output, ".mystiko.json is valid (1 environment: test)");
}

#[test]
fn test_check_lists_every_environment() {
    let t = Test::with_fixture("mystiko_defaults.json");

    let output = t.check(None);
    assert_success(&output);
    assert_stdout_contains(&output, "2 environments: local, staging");
}

#[test]
fn test_check_environment_counts_merged_defaults() {
    let t = Test::with_fixture("mystiko_defaults.json");

    let output = t.check(Some("local"));
    assert_success(&output);
    assert_stdout_contains(&output, "environment local resolves to 5 secrets");
}

#[test]
fn test_check_accepts_inferred_targets() {
    let t = Test::with_fixture("mystiko_schema_validation_no_target.json");

    let output = t.check(Some("dev"));
    assert_success(&output);
    assert_stdout_contains(&output, "resolves to 3 secrets");
}

#[test]
fn test_check_rejects_unsupported_target() {
    let t = Test::with_fixture("mystiko_invalid_target.json");

    let output = t.check(None);
    assert_failure(&output);
    assert_stderr_contains(&output, "schema validation failed with 1 error\n");
    assert_stderr_contains(
        &output,
        "/environments/test/secrets/0/target: must be one of \"env\", \"file\"",
    );
}

#[test]
fn test_check_reports_all_violations() {
    let t = Test::with_fixture("mystiko_broken.json");

    let output = t.check(None);
    assert_failure(&output);
    let err = stderr(&output);
    assert!(err.contains("/version: unknown key"), "{err}");
    assert!(err.contains("/environments/dev/regions: unknown key"), "{err}");
    assert!(
        err.contains("/environments/dev/secrets/0/envname: must not be combined with `keyValues`"),
        "{err}"
    );
    assert!(
        err.contains(
            "/environments/dev/secrets/0/keyValues/0: must declare one of `filename` or `envname`"
        ),
        "{err}"
    );
    assert!(
        err.contains("/defaults/secrets/0: must not declare both `filename` and `envname`"),
        "{err}"
    );
}

#[test]
fn test_check_unknown_environment() {
    let t = Test::with_fixture("mystiko.json");

    let output = t.check(Some("prod"));
    assert_failure(&output);
    assert_stderr_contains(&output, "environment 'prod' is not defined (available: test)");
}

#[test]
fn test_check_config_from_env_var() {
    let t = Test::new();
    let output = t
        .cmd()
        .arg("check")
        .env("MYSTIKO_CONFIG", fixture("mystiko.json"))
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, "mystiko.json is valid");
}
