//! User-facing progress reporting.
//!
//! The engine reports write actions and failures through a [`Logger`];
//! the CLI prints them, embedders may collect or drop them.

use std::sync::Mutex;

/// Sink for user-facing messages.
pub trait Logger: Send + Sync {
    fn log(&self, text: &str);
    fn warn(&self, text: &str);
    fn error(&self, text: &str);
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Logger for Silent {
    fn log(&self, _text: &str) {}
    fn warn(&self, _text: &str) {}
    fn error(&self, _text: &str) {}
}

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Log,
    Warn,
    Error,
}

/// Records messages in order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded messages, oldest first.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Recorded messages of one level.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, text)| text)
            .collect()
    }

    fn push(&self, level: Level, text: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, text.to_string()));
        }
    }
}

impl Logger for MemoryLogger {
    fn log(&self, text: &str) {
        self.push(Level::Log, text);
    }

    fn warn(&self, text: &str) {
        self.push(Level::Warn, text);
    }

    fn error(&self, text: &str) {
        self.push(Level::Error, text);
    }
}
