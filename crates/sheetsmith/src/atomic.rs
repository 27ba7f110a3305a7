//! Atomic file replacement.
//!
//! Output files are never written in place. The bytes go to a sibling
//! temporary file first, which is then renamed over the target. Renames
//! within one filesystem are atomic, so readers see either the old file or
//! the complete new one, never a truncated workbook.
//!
//! If anything fails before the rename, the target is left untouched and the
//! temporary file is removed on a best-effort basis.

use crate::error::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Atomically replaces the file at `path` with `contents`.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written, or
/// if the final rename fails (for example across filesystems or when the
/// target is locked). In every error case the original file, if any, is
/// unchanged.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> sheetsmith::error::Result<()> {
/// sheetsmith::atomic::write_atomic("report.xlsx", b"...").await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, contents).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Replaced file");
    Ok(())
}

/// Temp path used while writing `path`: `report.xlsx` becomes
/// `report.xlsx.tmp`, and an extensionless `report` becomes `report.tmp`.
pub(crate) fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file(temp_path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::with_extension("out.xlsx", "out.xlsx.tmp")]
    #[case::without_extension("out", "out.tmp")]
    #[case::nested("dir/data.v2.xlsx", "dir/data.v2.xlsx.tmp")]
    fn temp_path_is_a_sibling(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(make_temp_path(Path::new(input)), PathBuf::from(expected));
    }

    #[tokio::test]
    async fn creates_new_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("new.xlsx");

        write_atomic(&target, b"hello").await.unwrap();

        assert_eq!(tokio::fs::read(&target).await.unwrap(), b"hello");
        assert!(!make_temp_path(&target).exists());
    }

    #[tokio::test]
    async fn replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("existing.xlsx");
        tokio::fs::write(&target, b"old contents that are longer")
            .await
            .unwrap();

        write_atomic(&target, b"new").await.unwrap();

        assert_eq!(tokio::fs::read(&target).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn missing_directory_fails_without_side_effects() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("no-such-dir").join("out.xlsx");

        let result = write_atomic(&target, b"data").await;

        assert!(result.is_err());
        assert!(!target.exists());
        assert!(!make_temp_path(&target).exists());
    }

    #[tokio::test]
    async fn failed_rename_keeps_original_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let target = dir.path().join("occupied.xlsx");
        tokio::fs::create_dir(&target).await.unwrap();
        tokio::fs::write(target.join("keep"), b"x").await.unwrap();

        let result = write_atomic(&target, b"data").await;

        assert!(result.is_err());
        assert!(target.join("keep").exists());
        assert!(!make_temp_path(&target).exists());
    }
}
