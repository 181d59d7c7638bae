//! Output data formats for the CLI commands.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormattingError {
    #[error("unsupported output format: {0}")]
    UnsupportedOutputFormat(String),
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Output data format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Names accepted on the command line, in display order.
    pub fn names() -> Vec<&'static str> {
        vec!["text", "json"]
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(FormattingError::UnsupportedOutputFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Values the CLI can render in any supported output format.
pub trait Formattable: Serialize {
    /// One line per record; the human-readable default.
    fn text_lines(&self) -> Vec<String>;

    fn format(&self, format: OutputFormat) -> Result<String, FormattingError> {
        match format {
            OutputFormat::Text => Ok(self.text_lines().join("\n")),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
