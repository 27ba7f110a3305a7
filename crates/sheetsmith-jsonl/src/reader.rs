//! JSONL reading operations.
//!
//! This module provides async, buffered reading of JSONL data one record at a
//! time, tracking physical line numbers so that errors and warnings can point
//! at the offending line.

use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::{Error, Result};
use crate::warning::{Warning, WarningCollector};

/// UTF-8 byte-order mark, ignored at the very start of the input.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader in a [`BufReader`] and yields one
/// deserialized record per non-blank line. Blank and whitespace-only lines
/// are skipped but still counted, so [`line_number`](Self::line_number)
/// always matches what a text editor would show.
///
/// # Examples
///
/// ```no_run
/// use sheetsmith_jsonl::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("data.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(record) = reader.read_line::<serde_json::Value>().await? {
///     println!("{record}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Line number of the last line read (1-based, 0 before any read).
    line_number: usize,
    /// Scratch buffer reused across lines.
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Creates a new `JsonlReader` with a custom buffer capacity.
    ///
    /// Useful when records are known to be large and the default 8 KiB
    /// buffer would cause many small reads.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Returns the line number of the last line read.
    ///
    /// Returns 0 before any lines have been read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }

    /// Reads and deserializes the next record.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the underlying reader fails
    /// - [`Error::Encoding`] if the line is not valid UTF-8
    /// - [`Error::Parse`] if the line is not valid JSON for `T`
    pub async fn read_line<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        let Some((line_number, line)) = self.next_line().await? else {
            return Ok(None);
        };

        let text = line.map_err(|_| Error::Encoding { line_number })?;
        serde_json::from_str(text)
            .map(Some)
            .map_err(|source| Error::Parse {
                line_number,
                source,
            })
    }

    /// Reads the next record, skipping lines that cannot be decoded.
    ///
    /// Every skipped line is recorded in `warnings`. Only I/O failures are
    /// returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying reader fails.
    pub async fn read_line_resilient<T: DeserializeOwned>(
        &mut self,
        warnings: &WarningCollector,
    ) -> Result<Option<T>> {
        loop {
            let Some((line_number, line)) = self.next_line().await? else {
                return Ok(None);
            };

            let Ok(text) = line else {
                warnings.add(Warning::InvalidUtf8 { line_number });
                continue;
            };

            match serde_json::from_str(text) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => warnings.add(Warning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                }),
            }
        }
    }

    /// Reads all remaining records, failing on the first bad line.
    ///
    /// # Errors
    ///
    /// See [`read_line`](Self::read_line).
    pub async fn read_all<T: DeserializeOwned>(&mut self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_line().await? {
            records.push(record);
        }
        Ok(records)
    }

    /// Reads all remaining records, skipping bad lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying reader fails.
    pub async fn read_all_resilient<T: DeserializeOwned>(
        &mut self,
        warnings: &WarningCollector,
    ) -> Result<Vec<T>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_line_resilient(warnings).await? {
            records.push(record);
        }
        Ok(records)
    }

    /// Advances to the next non-blank line.
    ///
    /// Returns the line's number and its text, or the UTF-8 error if the
    /// bytes could not be decoded.
    async fn next_line(
        &mut self,
    ) -> Result<Option<(usize, std::result::Result<&str, std::str::Utf8Error>)>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if self.line_number == 1 && self.buf.starts_with(UTF8_BOM) {
                self.buf.drain(..UTF8_BOM.len());
            }

            if !self.buf.iter().all(u8::is_ascii_whitespace) {
                break;
            }
        }

        Ok(Some((self.line_number, std::str::from_utf8(&self.buf))))
    }
}
