//! Rendering of analysis results as text, CSV or JSON.

pub mod csv;
mod text;

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisResult;
use crate::error::ZonesError;

pub use self::csv::{to_csv, write_csv};
pub use self::text::write_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl ReportFormat {
    pub fn name(self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportFormat {
    type Err = ZonesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(ZonesError::config(format!(
                "unknown format {other:?}, expected text, csv or json"
            ))),
        }
    }
}

/// Write `result` to `out` in the given format
/// `color` only affects the text format.
pub fn write_report<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    format: ReportFormat,
    color: bool,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => write_text(out, result, color),
        ReportFormat::Csv => write_csv(out, result),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, result)?;
            writeln!(out)
        }
    }
}

/// ANSI colors on stdout: only for a terminal, and never when `NO_COLOR` is set
pub fn stdout_color_enabled() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
