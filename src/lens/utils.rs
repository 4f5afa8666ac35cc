//! Output helpers shared by every command

use serde::{Deserialize, Serialize};
use std::fmt;

/// How command results are printed
///
/// Table output is meant for people; the JSON variants and PSV are meant for
/// scripts piping addresses into other tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Rounded table (default)
    #[default]
    #[cfg_attr(feature = "cli", value(alias = "pretty"))]
    Table,
    /// Markdown table
    #[cfg_attr(feature = "cli", value(alias = "md"))]
    Markdown,
    /// Compact JSON
    Json,
    /// Indented JSON
    JsonPretty,
    /// One JSON object per line
    #[cfg_attr(feature = "cli", value(alias = "jsonl", alias = "ndjson"))]
    JsonLine,
    /// Pipe-separated values with a header line
    Psv,
}

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty | Self::JsonLine)
    }

    /// Serialize `value` as a single JSON document.
    ///
    /// `JsonLine` is treated like `Json`; callers that stream rows handle it
    /// themselves. Returns `None` for the non-JSON formats.
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Option<String> {
        match self {
            Self::Json | Self::JsonLine => serde_json::to_string(value).ok(),
            Self::JsonPretty => serde_json::to_string_pretty(value).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::JsonPretty => "json-pretty",
            Self::JsonLine => "json-line",
            Self::Psv => "psv",
        };
        write!(f, "{}", name)
    }
}

/// Break `text` into lines of at most `width` characters at spaces.
///
/// Words longer than `width` get a line of their own rather than being split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
