//! Tests for `mystiko plan`.

use crate::support::*;

#[test]
fn test_plan_shows_key_value_targets() {
    let t = Test::with_fixture("mystiko.json");

    let output = t.plan("test");
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("Environment test"), "{out}");
    assert!(out.contains("me-south-1"), "{out}");
    assert!(out.contains("KEY_VALUE_SECRET1"), "{out}");
    assert!(out.contains(".SECRET_KEY1 → env SECRET_KEY1_ENV"), "{out}");
    assert!(out.contains(".SECRET_KEY3 → file ./test_gen_files/cert.crt"), "{out}");
    assert!(out.contains("NON_KEY_VALUE_SECRET1 → env SECRET_KEY3_ENV"), "{out}");
}

#[test]
fn test_plan_does_not_write_anything() {
    let t = Test::with_fixture("mystiko.json");

    assert_success(&t.plan("test"));
    assert!(!t.path("test_gen_files").exists());
}

#[test]
fn test_plan_json_merges_defaults() {
    let t = Test::with_fixture("mystiko_defaults.json");

    let plan = t.plan_json("local");
    assert_eq!(plan["region"], "us-west-2");

    let names: Vec<&str> = plan["secrets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "/App/HelloWorld/local_cert.key",
            "/App/HelloWorld/local_cert.crt",
            "/Shared/essp",
            "/App/HelloWorld/DEFAULT_ADD_PREFIX",
            "/Shared/DEFAULT_IGNORE_PREFIX",
        ]
    );
}

#[test]
fn test_plan_json_environment_without_region() {
    let t = Test::with_fixture("mystiko_defaults.json");

    let plan = t.plan_json("staging");
    assert!(plan.get("region").is_none());
    assert_eq!(plan["secrets"].as_array().unwrap().len(), 3);
}

#[test]
fn test_plan_environment_from_env_var() {
    let t = Test::with_fixture("mystiko.json");

    let output = t.cmd().arg("plan").env("MYSTIKO_ENV", "test").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Environment test");
}
