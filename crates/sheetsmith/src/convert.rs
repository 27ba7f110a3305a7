//! The load → tabulate → export pipeline.

use crate::config::MalformedPolicy;
use crate::error::{Error, Result};
use crate::export::{export_xlsx, ExportOptions};
use crate::table::Table;
use serde::Serialize;
use serde_json::{Map, Value};
use sheetsmith_jsonl::{read_jsonl, read_jsonl_resilient, Warning};
use std::path::{Path, PathBuf};

/// Everything needed for one conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// JSONL file to read.
    pub input: PathBuf,
    /// Workbook to write; replaced if it exists.
    pub output: PathBuf,
    /// Handling of lines that cannot be decoded.
    pub on_malformed: MalformedPolicy,
    /// Worksheet layout.
    pub export: ExportOptions,
}

/// What a conversion (or inspection) produced.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    /// The JSONL file that was read.
    pub input: PathBuf,
    /// The workbook written, or `None` for an inspection.
    pub output: Option<PathBuf>,
    /// The worksheet name used.
    pub sheet_name: Option<String>,
    /// Number of data rows.
    pub rows: usize,
    /// Column names in sheet order.
    pub columns: Vec<String>,
    /// Lines skipped while loading.
    pub warnings: Vec<Warning>,
}

/// Default output path: the input path with an `.xlsx` extension.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("xlsx")
}

/// Absolute form of `path` with symlinks resolved. A file that does not
/// exist yet is resolved through its parent directory.
async fn resolve_path(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = tokio::fs::canonicalize(path).await {
        return Some(resolved);
    }
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = tokio::fs::canonicalize(parent).await.ok()?;
    Some(parent.join(file_name))
}

/// Refuse an output path that resolves to the input file.
///
/// # Errors
///
/// Returns [`Error::OutputIsInput`] when both paths name the same file.
pub async fn ensure_distinct_output(input: &Path, output: &Path) -> Result<()> {
    let Some(input_path) = resolve_path(input).await else {
        return Ok(());
    };
    if resolve_path(output).await.as_ref() == Some(&input_path) {
        return Err(Error::OutputIsInput(output.to_path_buf()));
    }
    Ok(())
}

/// Load a JSONL file into a [`Table`].
///
/// With [`MalformedPolicy::Fail`] the first line that is not a JSON object
/// aborts the load; with [`MalformedPolicy::Skip`] such lines are dropped and
/// returned as warnings.
///
/// # Errors
///
/// Returns [`Error::Jsonl`](crate::error::Error::Jsonl) if the file cannot be
/// read, or if a line is malformed under [`MalformedPolicy::Fail`].
pub async fn load_table(input: &Path, policy: MalformedPolicy) -> Result<(Table, Vec<Warning>)> {
    let (records, warnings) = match policy {
        MalformedPolicy::Fail => (read_jsonl::<Map<String, Value>, _>(input).await?, Vec::new()),
        MalformedPolicy::Skip => read_jsonl_resilient::<Map<String, Value>, _>(input).await?,
    };
    Ok((Table::from_records(records), warnings))
}

/// Convert a JSONL file into an `.xlsx` workbook.
///
/// The output file is only created (or replaced) once the input has been
/// loaded completely and the workbook assembled, so a failed conversion
/// leaves the file system as it was. An output path that names the input
/// file is refused before anything is read.
///
/// # Errors
///
/// [`Error::OutputIsInput`] (see [`ensure_distinct_output`]), any load
/// error (see [`load_table`]) or export error (see [`export_xlsx`]).
pub async fn convert(options: &ConvertOptions) -> Result<ConversionSummary> {
    tracing::debug!(
        input = %options.input.display(),
        output = %options.output.display(),
        "Converting"
    );

    ensure_distinct_output(&options.input, &options.output).await?;
    let (table, warnings) = load_table(&options.input, options.on_malformed).await?;
    export_xlsx(&table, &options.output, &options.export).await?;

    Ok(ConversionSummary {
        input: options.input.clone(),
        output: Some(options.output.clone()),
        sheet_name: Some(options.export.sheet_name.clone()),
        rows: table.row_count(),
        columns: table.columns().to_vec(),
        warnings,
    })
}

/// Load a JSONL file and describe the table it would produce, without
/// writing anything.
///
/// # Errors
///
/// Any load error (see [`load_table`]).
pub async fn inspect(input: &Path, policy: MalformedPolicy) -> Result<ConversionSummary> {
    let (table, warnings) = load_table(input, policy).await?;

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: None,
        sheet_name: None,
        rows: table.row_count(),
        columns: table.columns().to_vec(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::jsonl("data/base.jsonl", "data/base.xlsx")]
    #[case::json("base.json", "base.xlsx")]
    #[case::no_extension("records", "records.xlsx")]
    fn test_default_output_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(default_output_path(Path::new(input)), PathBuf::from(expected));
    }

    #[tokio::test]
    async fn output_naming_the_input_is_refused() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("report.xlsx");
        std::fs::write(&input, b"{\"a\":1}\n").unwrap();
        let dotted = dir.path().join(".").join("report.xlsx");

        let err = ensure_distinct_output(&input, &dotted).await.unwrap_err();
        assert!(matches!(err, Error::OutputIsInput(_)));
    }

    #[tokio::test]
    async fn distinct_or_missing_paths_are_accepted() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.jsonl");
        std::fs::write(&input, b"").unwrap();

        assert!(ensure_distinct_output(&input, &dir.path().join("in.xlsx")).await.is_ok());
        assert!(
            ensure_distinct_output(&dir.path().join("gone.jsonl"), &dir.path().join("gone.jsonl"))
                .await
                .is_ok()
        );
    }
}
