//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: write actions, success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, env var names, hints
//! - Bold: headers
//! - Dimmed: labels, rules

use console::style;
use std::fmt::Display;

use crate::core::constants::LOG_PREFIX;
use crate::core::report::Logger;

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Logger printing `MYSTIKO:`-prefixed lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Logger for Console {
    fn log(&self, text: &str) {
        prefixed(text, Tone::Green);
    }

    fn warn(&self, text: &str) {
        prefixed(text, Tone::Yellow);
    }

    fn error(&self, text: &str) {
        prefixed(text, Tone::Red);
    }
}

enum Tone {
    Green,
    Yellow,
    Red,
}

fn prefixed(text: &str, tone: Tone) {
    let line = format!("{}{}", LOG_PREFIX, text);
    if colors_enabled() {
        let styled = match tone {
            Tone::Green => style(line).green(),
            Tone::Yellow => style(line).yellow(),
            Tone::Red => style(line).red(),
        };
        println!("{}", styled);
    } else {
        println!("{}", line);
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ configuration is valid`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ environment 'prod' is not defined`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message (cyan) to stderr.
///
/// Example: `→ available environments: dev, prod`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!(
            "{} {}",
            style("→").cyan(),
            style(msg).cyan()
        );
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold section header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  region:  eu-west-1`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!(
            "  {}  {}",
            style(label).dim(),
            style(value.to_string()).bold()
        );
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a horizontal rule separator.
pub fn rule() {
    let line = "─".repeat(RULE_WIDTH);
    if colors_enabled() {
        println!("{}", style(line).dim());
    } else {
        println!("{}", line);
    }
}

/// Format a path or env var name in cyan.
pub fn target(t: &str) -> String {
    if colors_enabled() {
        style(t).cyan().to_string()
    } else {
        t.to_string()
    }
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}
