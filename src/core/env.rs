//! Environment variable sinks.
//!
//! Env targets are written through an [`EnvSink`] instead of touching the
//! process table directly, so a run can capture variables for a child
//! process or a test.

use std::sync::Mutex;
use tracing::trace;

/// Destination for environment variable writes.
pub trait EnvSink: Send + Sync {
    /// Set `name` to `value`, replacing any previous value.
    fn set(&self, name: &str, value: &str);
}

/// Writes to the current process environment.
///
/// Names are checked by schema validation; a name containing `=` or NUL
/// would make the standard library panic.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSink for ProcessEnv {
    fn set(&self, name: &str, value: &str) {
        trace!(name, "setting process environment variable");
        std::env::set_var(name, value);
    }
}

/// Captures variables in memory.
///
/// Entries keep first-write order; a repeated name updates in place.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: Mutex<Vec<(String, String)>>,
}

impl MemoryEnv {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value captured for `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.lock().ok().and_then(|vars| {
            vars.iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        })
    }

    /// Consume the sink, returning all captured pairs.
    pub fn into_vars(self) -> Vec<(String, String)> {
        self.vars.into_inner().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.lock().map(|v| v.is_empty()).unwrap_or(true)
    }
}

impl EnvSink for MemoryEnv {
    fn set(&self, name: &str, value: &str) {
        trace!(name, "capturing environment variable");
        if let Ok(mut vars) = self.vars.lock() {
            match vars.iter_mut().find(|(k, _)| k == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => vars.push((name.to_string(), value.to_string())),
            }
        }
    }
}
