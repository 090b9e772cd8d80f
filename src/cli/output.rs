use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::error::Result;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled text for terminals
    Human,
    /// One pretty JSON document
    Json,
    /// One JSON object per line
    Jsonl,
    /// Tab-separated, no headers
    Plain,
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    Partial { completed: usize, failed: usize },
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

/// Some units of work failed; `warnings` carries one entry per failure.
pub fn robot_partial<T: Serialize>(
    data: T,
    completed: usize,
    warnings: Vec<String>,
) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Partial {
            completed,
            failed: warnings.len(),
        },
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings,
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

pub fn emit_jsonl<T: Serialize>(items: impl IntoIterator<Item = T>) -> Result<()> {
    for item in items {
        println!("{}", serde_json::to_string(&item)?);
    }
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines.push(format!("{} {value}", style(padded).dim()));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_counts_failures_from_warnings() {
        let response = robot_partial(3_usize, 2, vec!["science: HTTP 503".to_string()]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"]["partial"]["completed"], 2);
        assert_eq!(value["status"]["partial"]["failed"], 1);
        assert_eq!(value["warnings"][0], "science: HTTP 503");
    }

    #[test]
    fn ok_omits_empty_warnings() {
        let value = serde_json::to_value(robot_ok("data")).unwrap();
        assert_eq!(value["status"], "ok");
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn layout_keeps_line_order() {
        console::set_colors_enabled(false);
        let mut layout = HumanLayout::new();
        layout.title("Jobs").kv("Records", "5").bullet("one");
        let text = layout.build();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Jobs");
        assert!(lines[2].starts_with("Records"));
        assert!(lines[2].ends_with(" 5"));
        assert_eq!(lines[3], "- one");
    }
}
