//! Configuration management for sheetsmith.
//!
//! Settings come from a YAML file, `sheetsmith.yaml` in the working directory
//! unless another path is given. Every field is optional; command-line flags
//! take precedence over the file, and built-in defaults fill the rest.
//!
//! ```yaml
//! sheet-name: Sheet1
//! on-malformed: fail
//! freeze-header: false
//! ```

use crate::error::{Error, Result};
use crate::export::{validate_sheet_name, DEFAULT_SHEET_NAME};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "sheetsmith.yaml";

/// What to do with input lines that cannot be decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Abort the conversion at the first bad line
    #[default]
    Fail,
    /// Skip bad lines and report them as warnings
    Skip,
}

/// Configuration file structure for sheetsmith
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SheetsmithConfig {
    /// Name of the worksheet in the output workbook
    pub sheet_name: String,

    /// Handling of malformed input lines
    pub on_malformed: MalformedPolicy,

    /// Freeze the header row in the output workbook
    pub freeze_header: bool,
}

impl Default for SheetsmithConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            on_malformed: MalformedPolicy::Fail,
            freeze_header: false,
        }
    }
}

impl SheetsmithConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Resolve the configuration for a run in `dir`.
    ///
    /// An explicit path must exist. Without one, `dir/sheetsmith.yaml` is
    /// used when present, and defaults otherwise.
    pub async fn resolve(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::load(path).await;
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&candidate).await? {
            tracing::debug!(path = %candidate.display(), "Loading configuration");
            Self::load(&candidate).await
        } else {
            tracing::debug!("No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        validate_sheet_name(&self.sheet_name).map_err(|e| Error::Config(e.to_string()))
    }
}
