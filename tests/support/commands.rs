//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// A mystiko command running inside the test directory.
    ///
    /// Configuration and log variables from the caller's environment are
    /// cleared so they cannot leak into assertions.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("mystiko").expect("failed to find mystiko binary");
        cmd.env_remove("MYSTIKO_CONFIG");
        cmd.env_remove("MYSTIKO_ENV");
        cmd.env_remove("MYSTIKO_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `mystiko check [ENV]`.
    pub fn check(&self, environment: Option<&str>) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("check");
        if let Some(env) = environment {
            cmd.arg(env);
        }
        cmd.output().expect("failed to run mystiko check")
    }

    /// Shortcut for `mystiko plan ENV`.
    pub fn plan(&self, environment: &str) -> Output {
        self.cmd()
            .args(["plan", environment])
            .output()
            .expect("failed to run mystiko plan")
    }

    /// Shortcut for `mystiko plan ENV --json`.
    pub fn plan_json(&self, environment: &str) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["plan", environment, "--json"])
            .output()
            .expect("failed to run mystiko plan --json");
        super::assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("plan --json printed invalid JSON")
    }
}
