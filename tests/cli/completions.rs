//! Tests for `mystiko completions`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_bash_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mystiko"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_unknown_shell_rejected() {
    let t = Test::new();

    t.cmd().args(["completions", "cmd.exe"]).assert().failure();
}
