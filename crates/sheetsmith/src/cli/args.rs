//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::validators::{validate_output_path, validate_sheet_name};

/// Arguments for the `convert` command
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// JSON Lines file to convert
    pub input: PathBuf,

    /// Output workbook path
    ///
    /// Defaults to the input path with an `.xlsx` extension. An existing
    /// file at this path is replaced.
    #[arg(short, long, value_parser = validate_output_path)]
    pub output: Option<PathBuf>,

    /// Worksheet name (default: Sheet1)
    #[arg(short, long, value_parser = validate_sheet_name)]
    pub sheet_name: Option<String>,

    /// Skip lines that are not valid JSON objects instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// Keep the header row visible while scrolling
    #[arg(long)]
    pub freeze_header: bool,

    /// Configuration file (default: ./sheetsmith.yaml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `inspect` command
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// JSON Lines file to inspect
    pub input: PathBuf,

    /// Skip lines that are not valid JSON objects instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// Configuration file (default: ./sheetsmith.yaml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}
