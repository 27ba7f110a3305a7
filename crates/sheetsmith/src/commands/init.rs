//! Implementation of the `init` command.
//!
//! Writes a `sheetsmith.yaml` holding the default settings, so they can be
//! edited instead of repeated on every command line.

use crate::config::{SheetsmithConfig, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the written config file
    pub config_file: PathBuf,
    /// Whether an existing file was replaced
    pub overwritten: bool,
}

/// Write a default configuration file into `base_dir`.
///
/// # Errors
///
/// Returns an error if:
/// - `sheetsmith.yaml` already exists and `force` is false
/// - The file cannot be written
pub async fn init(base_dir: &Path, force: bool) -> Result<InitResult> {
    let config_file = base_dir.join(CONFIG_FILE_NAME);
    let exists = fs::try_exists(&config_file).await?;

    if exists && !force {
        return Err(Error::Config(format!(
            "Found existing '{}'. Use --force to overwrite it",
            config_file.display()
        )));
    }

    SheetsmithConfig::default().save(&config_file).await?;
    tracing::debug!(path = %config_file.display(), "Wrote default configuration");

    Ok(InitResult {
        config_file,
        overwritten: exists,
    })
}
