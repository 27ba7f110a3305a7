//! Command execution functions.
//!
//! Each function merges command-line flags with the resolved configuration,
//! runs the command and prints its result.

use anyhow::{Context, Result};

use super::args::{ConvertArgs, InitArgs, InspectArgs};
use crate::config::{MalformedPolicy, SheetsmithConfig};
use crate::convert::{self, ConvertOptions};
use crate::export::ExportOptions;
use crate::output::{self, OutputMode};

/// Command-line flags win over the configuration file.
fn merge_convert_options(args: &ConvertArgs, config: SheetsmithConfig) -> ConvertOptions {
    ConvertOptions {
        input: args.input.clone(),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| convert::default_output_path(&args.input)),
        on_malformed: if args.skip_malformed {
            MalformedPolicy::Skip
        } else {
            config.on_malformed
        },
        export: ExportOptions {
            sheet_name: args.sheet_name.clone().unwrap_or(config.sheet_name),
            freeze_header: args.freeze_header || config.freeze_header,
        },
    }
}

/// Execute the convert command
pub async fn execute_convert(args: &ConvertArgs, output_mode: OutputMode) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config = SheetsmithConfig::resolve(&current_dir, args.config.as_deref()).await?;
    let options = merge_convert_options(args, config);

    let summary = convert::convert(&options)
        .await
        .with_context(|| format!("Failed to convert {}", options.input.display()))?;

    if !args.quiet || output_mode == OutputMode::Json {
        output::print_conversion(&summary, output_mode)?;
    }
    Ok(())
}

/// Execute the inspect command
pub async fn execute_inspect(args: &InspectArgs, output_mode: OutputMode) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config = SheetsmithConfig::resolve(&current_dir, args.config.as_deref()).await?;
    let policy = if args.skip_malformed {
        MalformedPolicy::Skip
    } else {
        config.on_malformed
    };

    let summary = convert::inspect(&args.input, policy)
        .await
        .with_context(|| format!("Failed to inspect {}", args.input.display()))?;
    output::print_inspection(&summary, output_mode)?;
    Ok(())
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, args.force).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "config_file": result.config_file.display().to_string(),
            "overwritten": result.overwritten,
        }))?,
        OutputMode::Text if !args.quiet => {
            println!("Wrote {}", result.config_file.display());
        }
        OutputMode::Text => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use std::path::PathBuf;

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        let mut full = vec!["sheetsmith", "convert"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Some(Commands::Convert(args)) => args,
            other => panic!("Expected Convert command, got {other:?}"),
        }
    }

    #[test]
    fn config_fills_in_missing_flags() {
        let config = SheetsmithConfig {
            sheet_name: "FromFile".to_string(),
            on_malformed: MalformedPolicy::Skip,
            freeze_header: true,
        };

        let options = merge_convert_options(&convert_args(&["data.jsonl"]), config);

        assert_eq!(options.output, PathBuf::from("data.xlsx"));
        assert_eq!(options.export.sheet_name, "FromFile");
        assert_eq!(options.on_malformed, MalformedPolicy::Skip);
        assert!(options.export.freeze_header);
    }

    #[test]
    fn flags_override_config() {
        let args = convert_args(&[
            "data.jsonl",
            "-o",
            "out/report.xlsx",
            "--sheet-name",
            "Flag",
            "--skip-malformed",
            "--freeze-header",
        ]);

        let options = merge_convert_options(&args, SheetsmithConfig::default());

        assert_eq!(options.output, PathBuf::from("out/report.xlsx"));
        assert_eq!(options.export.sheet_name, "Flag");
        assert_eq!(options.on_malformed, MalformedPolicy::Skip);
        assert!(options.export.freeze_header);
    }

    #[test]
    fn defaults_without_config_or_flags() {
        let options =
            merge_convert_options(&convert_args(&["in.jsonl"]), SheetsmithConfig::default());

        assert_eq!(options.export, ExportOptions::default());
        assert_eq!(options.on_malformed, MalformedPolicy::Fail);
    }
}
