//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with dedicated
//! human renderings for version reports and their findings.

use crate::cli::OutputFormat;
use crate::error::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use schemaver_core::{Bump, Finding, VersionReport};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

/// Machine-readable wrapper around a [`VersionReport`]
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub new_schema: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_schema: Option<&'a Path>,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: &'a VersionReport,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(new_schema: &'a Path, old_schema: Option<&'a Path>, report: &'a VersionReport) -> Self {
        Self {
            new_schema,
            old_schema,
            generated_at: Utc::now(),
            report,
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only, suppressed by `--quiet`)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "writing structured output");
        self.writeln(formatted.trim_end())
    }

    /// Write the result of `bump`: the bare version for humans, the report otherwise
    pub fn bump_report(&mut self, envelope: &ReportEnvelope<'_>) -> Result<()> {
        match self.format {
            OutputFormat::Human => self.writeln(&envelope.report.next_version),
            _ => self.data(envelope),
        }
    }

    /// Write the result of `diff`
    pub fn diff_report(&mut self, envelope: &ReportEnvelope<'_>) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                let rendered = format_diff_human(envelope.report, self.use_color, self.quiet);
                self.writeln(rendered.trim_end())
            }
            _ => self.data(envelope),
        }
    }
}

/// Render a report as a summary line plus one line per finding
pub fn format_diff_human(report: &VersionReport, use_color: bool, quiet: bool) -> String {
    let mut output = String::new();

    let bump = paint_bump(report.bump, &report.bump.to_string(), use_color);
    output.push_str(&format!(
        "{} -> {} ({} bump, severity {})\n",
        report.previous_version, report.next_version, bump, report.severity
    ));

    if quiet {
        return output;
    }

    if report.findings.is_empty() {
        output.push_str("No changes detected\n");
        return output;
    }

    output.push('\n');
    let width = report
        .findings
        .iter()
        .map(|f| f.path.len())
        .max()
        .unwrap_or(0);
    for finding in &report.findings {
        output.push_str(&format_finding_human(finding, width, use_color));
        output.push('\n');
    }

    output
}

fn format_finding_human(finding: &Finding, width: usize, use_color: bool) -> String {
    let bump = finding.severity.bump();
    let label = paint_bump(bump, &format!("{:<5}", bump.to_string().to_uppercase()), use_color);
    format!(
        "  {}  {:<width$}  {}",
        label,
        finding.path,
        finding.message,
        width = width
    )
}

fn paint_bump(bump: Bump, text: &str, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    match bump {
        Bump::Major => text.red().bold().to_string(),
        Bump::Minor => text.yellow().to_string(),
        Bump::Patch => text.green().to_string(),
        Bump::None => text.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
