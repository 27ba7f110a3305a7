//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use std::path::PathBuf;

/// Validate a worksheet name.
///
/// Delegates to [`crate::export::validate_sheet_name`] to keep a single
/// source of truth for Excel's naming rules.
pub fn validate_sheet_name(s: &str) -> Result<String, String> {
    crate::export::validate_sheet_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Validate an output path.
///
/// The path must name a file, so an empty path or one ending in a
/// separator is rejected.
pub fn validate_output_path(s: &str) -> Result<PathBuf, String> {
    if s.trim().is_empty() {
        return Err("Output path cannot be empty".to_string());
    }

    if s.ends_with('/') || s.ends_with(std::path::MAIN_SEPARATOR) {
        return Err(format!("Output path '{s}' must name a file, not a directory"));
    }

    Ok(PathBuf::from(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default("Sheet1")]
    #[case::spaced("Base tratada")]
    fn test_validate_sheet_name_valid(#[case] name: &str) {
        assert_eq!(validate_sheet_name(name), Ok(name.to_string()));
    }

    #[rstest]
    #[case::empty("")]
    #[case::forbidden("a?b")]
    #[case::reserved("history")]
    #[case::too_long("this sheet name is far too long for excel")]
    fn test_validate_sheet_name_invalid(#[case] name: &str) {
        assert!(validate_sheet_name(name).is_err());
    }

    #[rstest]
    #[case::relative("out.xlsx")]
    #[case::nested("reports/2024/out.xlsx")]
    fn test_validate_output_path_valid(#[case] path: &str) {
        assert_eq!(validate_output_path(path), Ok(PathBuf::from(path)));
    }

    #[rstest]
    #[case::empty("", "empty")]
    #[case::blank("   ", "empty")]
    #[case::directory("reports/", "directory")]
    fn test_validate_output_path_invalid(#[case] path: &str, #[case] expected: &str) {
        let err = validate_output_path(path).unwrap_err();
        assert!(err.contains(expected), "'{err}' should mention '{expected}'");
    }
}
