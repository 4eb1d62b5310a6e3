//! Indentation rendering
//!
//!     The bridge between indentation levels and literal whitespace. Anchors only ever talk
//!     in levels; these helpers measure the level an existing prefix stands for and produce
//!     the prefix for a target level.
//!
//!     Measuring works in columns: a space advances one column, a tab advances to the next
//!     tab stop. The column count is divided by the width of one unit, rounding down, so a
//!     stray space never counts as a level.

use serde::{Deserialize, Serialize};

/// The active indentation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentStyle {
    /// One level of indentation, e.g. `"\t"` or `"  "`.
    pub indent_string: String,
    pub tab_width: usize,
}

impl IndentStyle {
    pub fn new(indent_string: impl Into<String>, tab_width: usize) -> Self {
        IndentStyle {
            indent_string: indent_string.into(),
            tab_width,
        }
    }

    pub fn tabs(tab_width: usize) -> Self {
        IndentStyle::new("\t", tab_width)
    }

    pub fn spaces(width: usize) -> Self {
        IndentStyle::new(" ".repeat(width), width.max(1))
    }

    fn tab_stop(&self) -> usize {
        self.tab_width.max(1)
    }

    /// Columns covered by one level.
    pub fn unit_width(&self) -> usize {
        self.columns(&self.indent_string).max(1)
    }

    /// Columns covered by the leading whitespace of `text`.
    pub fn columns(&self, text: &str) -> usize {
        leading_whitespace(text).chars().fold(0, |column, c| match c {
            '\t' => column + self.tab_stop() - column % self.tab_stop(),
            _ => column + 1,
        })
    }

    /// Number of levels the leading whitespace of `text` represents.
    pub fn measure_indent(&self, text: &str) -> usize {
        self.columns(text) / self.unit_width()
    }

    /// Whitespace for `level` levels.
    ///
    /// Follows the character `base` is indented with when that is unambiguous: tabs when it
    /// is all tabs and a tab is one level wide, spaces when it is all spaces. Anything else,
    /// including an empty `base`, falls back to the configured unit.
    pub fn render_indent(&self, base: &str, level: usize) -> String {
        let prefix = leading_whitespace(base);
        if !prefix.is_empty() && prefix.chars().all(|c| c == '\t') {
            if self.tab_stop() == self.unit_width() {
                return "\t".repeat(level);
            }
        } else if !prefix.is_empty() && prefix.chars().all(|c| c == ' ') {
            return " ".repeat(level * self.unit_width());
        }
        self.indent_string.repeat(level)
    }
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::new("  ", 4)
    }
}

/// The run of spaces and tabs `line` starts with.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}
