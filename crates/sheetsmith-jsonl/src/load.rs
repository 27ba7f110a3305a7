//! Whole-file loading.
//!
//! Convenience entry points that open a JSONL file and read every record,
//! either stopping at the first bad line ([`read_jsonl`]) or skipping bad
//! lines and reporting them ([`read_jsonl_resilient`]).

use crate::reader::JsonlReader;
use crate::warning::{Warning, WarningCollector};
use crate::Result;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs::File;

/// Reads every record from a JSONL file, failing on the first bad line.
///
/// Nothing is returned unless the whole file parses.
///
/// # Errors
///
/// - [`Error::Io`](crate::Error::Io) if the file cannot be opened or read
/// - [`Error::Parse`](crate::Error::Parse) or
///   [`Error::Encoding`](crate::Error::Encoding) for the first line that
///   cannot be decoded
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> sheetsmith_jsonl::Result<()> {
/// let records: Vec<serde_json::Value> = sheetsmith_jsonl::read_jsonl("data.jsonl").await?;
/// println!("{} records", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn read_jsonl<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Reading JSONL file");

    let file = File::open(path).await?;
    let mut reader = JsonlReader::new(file);
    let records = reader.read_all().await?;

    tracing::debug!(
        records = records.len(),
        lines = reader.line_number(),
        "Finished reading JSONL file"
    );
    Ok(records)
}

/// Reads every decodable record from a JSONL file.
///
/// Lines that are not valid JSON (or not the shape `T` expects) and lines
/// that are not valid UTF-8 are skipped; each produces one [`Warning`].
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the file cannot be opened or
/// read. Decoding problems never fail the load.
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Reading JSONL file (resilient)");

    let file = File::open(path).await?;
    let mut reader = JsonlReader::new(file);
    let collector = WarningCollector::new();
    let records = reader.read_all_resilient(&collector).await?;
    let warnings = collector.into_warnings();

    tracing::debug!(
        records = records.len(),
        warnings = warnings.len(),
        lines = reader.line_number(),
        "Finished reading JSONL file"
    );
    Ok((records, warnings))
}
