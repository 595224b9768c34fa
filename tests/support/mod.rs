//! Test support utilities for mystiko integration tests.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory for one test.
///
/// Child processes run with `.current_dir()` and configs use absolute
/// paths, so tests never touch process-global state and can run in parallel.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Absolute path of `rel` inside the test directory.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `.mystiko.json` into the test directory.
    pub fn write_config(&self, config: &Value) -> PathBuf {
        self.write_config_as(".mystiko.json", config)
    }

    /// Write a configuration under a custom file name.
    pub fn write_config_as(&self, name: &str, config: &Value) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_string_pretty(config).unwrap())
            .expect("failed to write config");
        path
    }

    /// Copy a fixture into the test directory as `.mystiko.json`.
    pub fn with_fixture(name: &str) -> Self {
        let t = Self::new();
        std::fs::copy(fixture(name), t.path(".mystiko.json")).expect("failed to copy fixture");
        t
    }

    /// Read a file written by a run, relative to the test directory.
    pub fn read(&self, rel: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.path(rel)).expect("failed to read generated file")
    }
}
