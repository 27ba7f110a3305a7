//! Non-fatal problems found while loading JSONL data.
//!
//! Resilient loading skips lines it cannot decode instead of failing. Each
//! skipped line is described by a [`Warning`], and the warnings for one load
//! are gathered in a [`WarningCollector`].
//!
//! # Examples
//!
//! ```
//! use sheetsmith_jsonl::warning::{Warning, WarningCollector};
//!
//! let collector = WarningCollector::new();
//! collector.add(Warning::MalformedJson {
//!     line_number: 5,
//!     error: "unexpected end of input".to_string(),
//! });
//! collector.add(Warning::InvalidUtf8 { line_number: 9 });
//!
//! let warnings = collector.into_warnings();
//! assert_eq!(warnings.len(), 2);
//! ```

use serde::Serialize;
use std::sync::{Arc, Mutex};

/// A line that was skipped during resilient loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The line was not valid JSON, or not the expected shape of record.
    MalformedJson {
        /// The 1-based line number of the skipped line.
        line_number: usize,
        /// The JSON parser's description of the problem.
        error: String,
    },

    /// The line contained bytes that are not valid UTF-8.
    InvalidUtf8 {
        /// The 1-based line number of the skipped line.
        line_number: usize,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::InvalidUtf8 { line_number } => {
                *line_number
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    ///
    /// ```
    /// use sheetsmith_jsonl::Warning;
    ///
    /// assert_eq!(Warning::InvalidUtf8 { line_number: 1 }.kind(), "invalid_utf8");
    /// ```
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::InvalidUtf8 { .. } => "invalid_utf8",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: skipped malformed JSON: {error}")
            }
            Self::InvalidUtf8 { line_number } => {
                write!(f, "line {line_number}: skipped invalid UTF-8")
            }
        }
    }
}

impl std::error::Error for Warning {}

/// A shareable collector for warnings raised during one load.
///
/// Clones share the same storage, so a collector can be handed to a reader
/// and inspected afterwards by the caller. Every added warning is also
/// logged at `warn` level.
///
/// # Mutex Poisoning
///
/// All methods panic if the internal mutex is poisoned, which only happens
/// if another thread panicked while holding the lock.
#[derive(Debug, Clone, Default)]
pub struct WarningCollector {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl WarningCollector {
    /// Creates a new empty `WarningCollector`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning to the collector.
    pub fn add(&self, warning: Warning) {
        tracing::warn!(
            line_number = warning.line_number(),
            kind = warning.kind(),
            "{warning}"
        );
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .push(warning);
    }

    /// Returns the number of warnings collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .len()
    }

    /// Returns `true` if no warnings have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of all collected warnings, leaving the collector intact.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .clone()
    }

    /// Consumes the collector and returns all collected warnings.
    ///
    /// If other clones are still alive the warnings are copied out instead
    /// of moved.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        Arc::try_unwrap(self.warnings)
            .map(|mutex| mutex.into_inner().expect("mutex should not be poisoned"))
            .unwrap_or_else(|arc| {
                arc.lock()
                    .expect("warning collector mutex should not be poisoned")
                    .clone()
            })
    }
}
