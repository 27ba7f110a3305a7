//! Line-tracking JSON Lines loader.
//!
//! This library reads JSONL (JSON Lines) documents record by record, keeping
//! 1-based physical line numbers for error reporting. Loading is either
//! strict (the first bad line aborts) or resilient (bad lines are skipped and
//! reported as [`Warning`]s).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod load;
pub mod reader;
pub mod warning;

pub use error::{Error, Result};
pub use load::{read_jsonl, read_jsonl_resilient};
pub use reader::JsonlReader;
pub use warning::{Warning, WarningCollector};
