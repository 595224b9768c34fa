//! Access to the JSON fixtures under `tests/fixtures`.

use std::path::PathBuf;

/// Absolute path of a fixture file.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parsed contents of a fixture file.
pub fn fixture_json(name: &str) -> serde_json::Value {
    let text = std::fs::read_to_string(fixture(name)).expect("failed to read fixture");
    serde_json::from_str(&text).expect("fixture is not valid JSON")
}
