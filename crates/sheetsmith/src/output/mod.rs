//! Output formatting for CLI commands.
//!
//! Command results are printed either as human-readable text or as JSON for
//! programmatic use.
//!
//! Submodules:
//! - [`color`]: Semantic color helpers

pub mod color;

use crate::convert::ConversionSummary;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

use color::{dimmed, info, success, warning};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_colors: bool) -> Self {
        Self {
            max_width,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `SHEETSMITH_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `SHEETSMITH_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        let max_width = match env::var("SHEETSMITH_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => match s.parse() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "SHEETSMITH_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("SHEETSMITH_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_colors,
        }
    }

    /// Width available for wrapped content on this terminal.
    fn content_width(&self) -> usize {
        get_terminal_width().min(self.max_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print the result of a conversion in the specified format
pub fn print_conversion(summary: &ConversionSummary, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_conversion_text(&mut handle, summary, &OutputConfig::from_env())
        }
        OutputMode::Json => print_json(summary),
    }
}

/// Print the result of an inspection in the specified format
pub fn print_inspection(summary: &ConversionSummary, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let config = OutputConfig::from_env();
            let width = config.content_width();
            write_inspection_text(&mut handle, summary, width, &config)
        }
        OutputMode::Json => print_json(summary),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{}", json)
}

// ============================================================================
// Text Formatting
// ============================================================================

fn write_conversion_text<W: Write>(
    w: &mut W,
    summary: &ConversionSummary,
    config: &OutputConfig,
) -> io::Result<()> {
    let output = summary
        .output
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let message = format!(
        "Converted {} rows x {} columns to",
        summary.rows,
        summary.columns.len()
    );
    writeln!(w, "{} {}", success(&message, config), info(&output, config))?;
    write_warnings(w, summary, config)
}

fn write_inspection_text<W: Write>(
    w: &mut W,
    summary: &ConversionSummary,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}",
        dimmed("File:    ", config),
        info(&summary.input.display().to_string(), config)
    )?;
    writeln!(w, "{} {}", dimmed("Rows:    ", config), summary.rows)?;
    writeln!(
        w,
        "{} {}",
        dimmed("Columns: ", config),
        summary.columns.len()
    )?;
    if !summary.columns.is_empty() {
        let list = summary.columns.join(", ");
        for line in textwrap::wrap(&list, width.saturating_sub(2).max(1)) {
            writeln!(w, "  {line}")?;
        }
    }
    write_warnings(w, summary, config)
}

fn write_warnings<W: Write>(
    w: &mut W,
    summary: &ConversionSummary,
    config: &OutputConfig,
) -> io::Result<()> {
    for item in &summary.warnings {
        writeln!(w, "{} {}", warning("warning:", config), item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsmith_jsonl::Warning;
    use std::path::PathBuf;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false)
    }

    fn summary() -> ConversionSummary {
        ConversionSummary {
            input: PathBuf::from("in.jsonl"),
            output: Some(PathBuf::from("out.xlsx")),
            sheet_name: Some("Sheet1".to_string()),
            rows: 2,
            columns: vec!["a".to_string(), "b".to_string()],
            warnings: vec![Warning::MalformedJson {
                line_number: 3,
                error: "expected value".to_string(),
            }],
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn conversion_text_reports_counts_and_path() {
        let text = render(|w| write_conversion_text(w, &summary(), &plain()));
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("Converted 2 rows x 2 columns to out.xlsx")
        );
        assert_eq!(
            lines.next(),
            Some("warning: line 3: skipped malformed JSON: expected value")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn inspection_text_lists_columns() {
        let text = render(|w| write_inspection_text(w, &summary(), 80, &plain()));

        assert!(text.contains("File:     in.jsonl"));
        assert!(text.contains("Rows:     2"));
        assert!(text.contains("Columns:  2"));
        assert!(text.contains("  a, b"));
    }

    #[test]
    fn inspection_text_wraps_long_column_lists() {
        let mut s = summary();
        s.columns = (0..40).map(|i| format!("column_{i}")).collect();
        s.warnings.clear();

        let text = render(|w| write_inspection_text(w, &s, 40, &plain()));

        let column_lines: Vec<&str> = text.lines().skip(3).collect();
        assert!(column_lines.len() > 1);
        assert!(column_lines.iter().all(|l| l.len() <= 40));
    }

    #[test]
    fn summary_serializes_for_json_mode() {
        let value = serde_json::to_value(summary()).unwrap();
        assert_eq!(value["rows"], 2);
        assert_eq!(value["output"], "out.xlsx");
        assert_eq!(value["columns"][1], "b");
        assert_eq!(value["warnings"][0]["kind"], "malformed_json");
    }
}
