//! Output formatting for the CLI.
//!
//! Results go to stdout (JSON with `--json`, styled text otherwise). Logs
//! and errors go to stderr.

use console::style;
use serde::Serialize;

use crate::error::ApiError;

/// Output handler for command results.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Prints `value` as pretty JSON in JSON mode, otherwise runs `text`.
    pub fn emit<T, F>(&self, value: &T, text: F)
    where
        T: Serialize,
        F: FnOnce(),
    {
        if self.json {
            match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{}", json),
                Err(e) => self.error(&ApiError::internal(e.to_string())),
            }
        } else {
            text();
        }
    }

    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Prints a row of left-aligned columns.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    pub fn error(&self, err: &ApiError) {
        if self.json {
            let body = serde_json::json!({ "error": err });
            eprintln!("{}", body);
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(err).red());
    }
}

/// Cuts `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}
