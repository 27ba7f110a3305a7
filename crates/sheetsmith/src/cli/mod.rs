//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for sheetsmith using
//! clap's derive API.
//!
//! # Commands
//!
//! - `convert`: Convert a JSON Lines file into an Excel workbook
//! - `inspect`: Show the rows and columns a conversion would produce
//! - `init`: Write a default `sheetsmith.yaml`
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! sheetsmith convert base.jsonl
//! sheetsmith convert base.jsonl -o report.xlsx --sheet-name Data
//! sheetsmith inspect base.jsonl --skip-malformed
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{ConvertArgs, InitArgs, InspectArgs};

// Re-export validators for external use
pub use validators::{validate_output_path, validate_sheet_name};

/// Sheetsmith - convert JSON Lines files into Excel workbooks
///
/// Every key seen in the input becomes a column; every line becomes a row.
#[derive(Parser, Debug)]
#[command(name = "sheetsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert a JSON Lines file into an Excel workbook
    ///
    /// Reads every line of the input as a JSON object and writes one row per
    /// line, with a header row holding the union of all keys. The output
    /// file is replaced atomically.
    Convert(ConvertArgs),

    /// Show the rows and columns a conversion would produce
    ///
    /// Loads the input exactly like `convert` but writes nothing.
    Inspect(InspectArgs),

    /// Write a default configuration file
    ///
    /// Creates `sheetsmith.yaml` in the current directory.
    Init(InitArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Convert(args)) => execute::execute_convert(args, output_mode).await,
            Some(Commands::Inspect(args)) => execute::execute_inspect(args, output_mode).await,
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode).await,
            None => {
                println!("Sheetsmith JSON Lines to Excel converter");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
