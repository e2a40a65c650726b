//! Shell command-line rendering of a [`Command`].

use crate::{command::Command, setting::Setting};
use serde::{Deserialize, Serialize};

/// Renders commands as wrapped, indented shell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormatter {
    /// Words preceding the task name, e.g. `stilts`.
    pub invocation: String,
    /// Spaces per group level.
    pub indent: usize,
    /// Preferred maximum line width. Single words are never broken.
    pub wrap: usize,
    /// Also write settings that equal their defaults.
    pub include_defaults: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            invocation: "stilts".to_string(),
            indent: 3,
            wrap: 80,
            include_defaults: false,
        }
    }
}

impl TextFormatter {
    pub fn format(&self, command: &Command) -> String {
        let mut lines = vec![format!("{} {}", self.invocation, command.task_name())];
        for group in command.groups() {
            let words: Vec<String> = group
                .settings()
                .iter()
                .filter(|setting| self.include_defaults || !setting.is_default_value())
                .map(format_word)
                .collect();
            let indent = " ".repeat(group.level() * self.indent);
            let mut line = String::new();
            for word in words {
                if !line.is_empty() && indent.len() + line.len() + 1 + word.len() > self.wrap {
                    lines.push(format!("{indent}{line}"));
                    line.clear();
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&word);
            }
            if !line.is_empty() {
                lines.push(format!("{indent}{line}"));
            }
        }
        lines.join(" \\\n")
    }
}

fn format_word(setting: &Setting) -> String {
    format!("{}={}", setting.key(), shell_quote(setting.value()))
}

/// Quotes `text` for a POSIX shell, leaving safe words bare.
pub fn shell_quote(text: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "-_.,:/+=@%^".contains(c);
    if text.chars().all(safe) {
        text.to_string()
    } else {
        format!("'{}'", text.replace('\'', "'\\''"))
    }
}
