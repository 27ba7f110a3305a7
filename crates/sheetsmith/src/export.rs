//! Spreadsheet export.
//!
//! Writes a [`Table`] to a single-worksheet `.xlsx` workbook. The first row
//! holds the column names, styled as a header; data rows follow in record
//! order. Empty cells are left blank.
//!
//! The workbook is assembled in memory and then written with
//! [`write_atomic`], so an existing file at the output path is replaced in
//! one step or not at all.

use crate::atomic::write_atomic;
use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet};
use std::path::Path;

/// Default worksheet name.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Maximum rows in an Excel worksheet, header included.
pub const MAX_ROWS: usize = 1_048_576;

/// Maximum columns in an Excel worksheet.
pub const MAX_COLUMNS: usize = 16_384;

/// Maximum characters in a single Excel cell.
pub const MAX_TEXT_LENGTH: usize = 32_767;

/// Largest magnitude an integer can have and still be stored exactly as an
/// Excel number. Larger integers are written as text.
pub const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Maximum characters in a worksheet name.
pub const MAX_SHEET_NAME_LENGTH: usize = 31;

const RESERVED_SHEET_NAME: &str = "History";

const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Options controlling how a table is laid out in the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Name of the single worksheet.
    pub sheet_name: String,
    /// Keep the header row visible while scrolling.
    pub freeze_header: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            freeze_header: false,
        }
    }
}

/// Validate a worksheet name against Excel's rules.
///
/// Requirements:
/// - 1-31 characters
/// - None of `[ ] : * ? / \`
/// - Does not begin or end with an apostrophe
/// - Is not `History` in any case, which Excel reserves
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidSheetName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }

    if name.chars().count() > MAX_SHEET_NAME_LENGTH {
        return Err(invalid(&format!(
            "name cannot exceed {MAX_SHEET_NAME_LENGTH} characters"
        )));
    }

    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
        return Err(invalid(&format!("name cannot contain '{c}'")));
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(invalid("name cannot begin or end with an apostrophe"));
    }

    if name.eq_ignore_ascii_case(RESERVED_SHEET_NAME) {
        return Err(invalid("name is reserved by Excel"));
    }

    Ok(())
}

/// Check that `rows` data rows and `columns` columns fit in one worksheet.
pub fn check_dimensions(rows: usize, columns: usize) -> Result<()> {
    // One row is taken by the header.
    if rows > MAX_ROWS - 1 {
        return Err(Error::SheetLimit(format!(
            "{rows} rows, but a worksheet holds at most {} data rows",
            MAX_ROWS - 1
        )));
    }
    if columns > MAX_COLUMNS {
        return Err(Error::SheetLimit(format!(
            "{columns} columns, but a worksheet holds at most {MAX_COLUMNS}"
        )));
    }
    Ok(())
}

/// Check every limit the table must satisfy before anything is written.
fn check_limits(table: &Table) -> Result<()> {
    check_dimensions(table.row_count(), table.column_count())?;

    let headers = table.columns().iter().map(|name| (0, name.as_str()));
    let texts = table.rows().iter().enumerate().flat_map(|(i, row)| {
        row.iter().filter_map(move |cell| match cell {
            Cell::Text(text) => Some((i + 1, text.as_str())),
            _ => None,
        })
    });

    for (row, text) in headers.chain(texts) {
        let length = text.chars().count();
        if length > MAX_TEXT_LENGTH {
            return Err(Error::SheetLimit(format!(
                "a cell in row {} has {length} characters, but a cell holds at most \
                 {MAX_TEXT_LENGTH}",
                row + 1
            )));
        }
    }
    Ok(())
}

/// Assemble the workbook for `table` in memory.
///
/// # Errors
///
/// Returns [`Error::SheetLimit`] if the table does not fit in a worksheet,
/// [`Error::InvalidSheetName`] for a bad sheet name, and [`Error::Xlsx`] if
/// the workbook cannot be serialized.
pub fn build_workbook(table: &Table, options: &ExportOptions) -> Result<Vec<u8>> {
    validate_sheet_name(&options.sheet_name)?;
    check_limits(table)?;

    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&options.sheet_name)?;
        if !table.columns().is_empty() {
            write_header(worksheet, table.columns())?;
            if options.freeze_header {
                worksheet.set_freeze_panes(1, 0)?;
            }
        }
        for (i, row) in table.rows().iter().enumerate() {
            write_row(worksheet, row_num(i + 1)?, row)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write `table` to an `.xlsx` file at `path`, replacing any existing file.
///
/// Limits are checked and the workbook is fully assembled before the file
/// system is touched.
///
/// # Errors
///
/// See [`build_workbook`]; additionally returns [`Error::Io`] if the file
/// cannot be written.
pub async fn export_xlsx<P: AsRef<Path>>(
    table: &Table,
    path: P,
    options: &ExportOptions,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = build_workbook(table, options)?;
    write_atomic(path, &bytes).await?;

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Wrote workbook"
    );
    Ok(())
}

fn write_header(worksheet: &mut Worksheet, columns: &[String]) -> Result<()> {
    let format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    for (i, name) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(i)?, name, &format)?;
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)] // exact while |n| <= MAX_EXACT_INTEGER
fn write_row(worksheet: &mut Worksheet, row: RowNum, cells: &[Cell]) -> Result<()> {
    for (i, cell) in cells.iter().enumerate() {
        let col = col_num(i)?;
        match cell {
            Cell::Empty => {}
            Cell::Bool(b) => {
                worksheet.write_boolean(row, col, *b)?;
            }
            Cell::Integer(n) if n.unsigned_abs() > MAX_EXACT_INTEGER => {
                worksheet.write_string(row, col, n.to_string())?;
            }
            Cell::Integer(n) => {
                worksheet.write_number(row, col, *n as f64)?;
            }
            Cell::Float(f) => {
                worksheet.write_number(row, col, *f)?;
            }
            Cell::Text(text) => {
                worksheet.write_string(row, col, text)?;
            }
        }
    }
    Ok(())
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index)
        .map_err(|_| Error::SheetLimit(format!("row {index} is out of range")))
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index)
        .map_err(|_| Error::SheetLimit(format!("column {index} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Map, Value};

    fn table_of(values: &[Value]) -> Table {
        Table::from_records(values.iter().filter_map(|v| v.as_object().cloned()))
    }

    // ========== Sheet Name Validation Tests ==========

    #[rstest]
    #[case::default("Sheet1")]
    #[case::spaces("My Data")]
    #[case::unicode("Relatório")]
    #[case::inner_apostrophe("Bob's rows")]
    #[case::max_length("a".repeat(31))]
    #[case::contains_reserved("History 2024")]
    fn test_validate_sheet_name_valid(#[case] name: impl AsRef<str>) {
        assert!(validate_sheet_name(name.as_ref()).is_ok());
    }

    #[rstest]
    #[case::empty("", "empty")]
    #[case::too_long("a".repeat(32), "cannot exceed 31")]
    #[case::bracket("data[1]", "'['")]
    #[case::colon("a:b", "':'")]
    #[case::slash("a/b", "'/'")]
    #[case::backslash("a\\b", "'\\'")]
    #[case::question("why?", "'?'")]
    #[case::star("all*", "'*'")]
    #[case::leading_apostrophe("'quoted", "apostrophe")]
    #[case::trailing_apostrophe("quoted'", "apostrophe")]
    #[case::reserved("History", "reserved")]
    #[case::reserved_lowercase("history", "reserved")]
    #[case::reserved_uppercase("HISTORY", "reserved")]
    fn test_validate_sheet_name_invalid(#[case] name: impl AsRef<str>, #[case] expected: &str) {
        let err = validate_sheet_name(name.as_ref()).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "'{err}' should mention '{expected}'"
        );
    }

    // ========== Limit Tests ==========

    #[test]
    fn dimensions_at_the_limit_are_accepted() {
        assert!(check_dimensions(MAX_ROWS - 1, MAX_COLUMNS).is_ok());
    }

    #[test]
    fn too_many_rows_is_rejected() {
        let err = check_dimensions(MAX_ROWS, 1).unwrap_err();
        assert!(matches!(err, Error::SheetLimit(_)));
    }

    #[test]
    fn too_many_columns_is_rejected() {
        let err = check_dimensions(1, MAX_COLUMNS + 1).unwrap_err();
        assert!(err.to_string().contains("16384"));
    }

    #[test]
    fn oversized_text_is_rejected_before_writing() {
        let table = table_of(&[json!({"a": "ok"}), json!({"a": "x".repeat(MAX_TEXT_LENGTH + 1)})]);
        let err = build_workbook(&table, &ExportOptions::default()).unwrap_err();
        assert!(err.to_string().contains("row 3"), "unexpected: {err}");
    }

    #[test]
    fn text_at_the_limit_is_accepted() {
        let table = table_of(&[json!({"a": "x".repeat(MAX_TEXT_LENGTH)})]);
        assert!(build_workbook(&table, &ExportOptions::default()).is_ok());
    }

    // ========== Workbook Assembly Tests ==========

    #[test]
    fn workbook_is_a_zip_archive() {
        let table = table_of(&[json!({"a": 1, "b": "x"})]);
        let bytes = build_workbook(&table, &ExportOptions::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_table_still_builds() {
        let table = Table::from_records(Vec::<Map<String, Value>>::new());
        assert!(build_workbook(&table, &ExportOptions::default()).is_ok());
    }

    #[test]
    fn invalid_sheet_name_is_rejected() {
        let options = ExportOptions {
            sheet_name: "bad/name".to_string(),
            freeze_header: false,
        };
        let table = table_of(&[json!({"a": 1})]);
        assert!(matches!(
            build_workbook(&table, &options),
            Err(Error::InvalidSheetName { .. })
        ));
    }
}
