use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::LocalFileReader;

use super::extractor::ZipExtractor;

/// Extract the whole archive at `archive_path` into `dest` and return the
/// first text file found there.
pub async fn extract_text_file(archive_path: &Path, dest: &Path) -> Result<PathBuf> {
    let reader = LocalFileReader::new(archive_path)?;
    let extractor = ZipExtractor::new(Arc::new(reader));

    let written = extractor.extract_all(dest).await?;
    debug!(files = written.len(), ?dest, "archive extracted");

    find_first_text(dest).await
}

/// Pick the text file among the top-level files of `dir`.
///
/// Matches like the shell glob `*.txt`: regular files only, no hidden
/// files, no recursion. When several match, the lexicographically first
/// path wins so the choice does not depend on directory listing order.
pub async fn find_first_text(dir: &Path) -> Result<PathBuf> {
    let mut entries = fs::read_dir(dir).await?;
    let mut candidates = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if name.starts_with('.') || !name.ends_with(".txt") {
            continue;
        }
        if entry.file_type().await?.is_file() {
            candidates.push(entry.path());
        }
    }

    candidates.sort();
    if candidates.len() > 1 {
        debug!(count = candidates.len(), "several text files, using the first");
    }
    candidates.into_iter().next().ok_or(Error::NoTextFound)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_text_is_lexicographic() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zzz.txt", "bbb.txt", "aaa.html", "ccc.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let found = find_first_text(dir.path()).await.unwrap();
        assert_eq!(found, dir.path().join("bbb.txt"));
    }

    #[tokio::test]
    async fn test_skips_hidden_files_directories_and_nested_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".hidden.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("folder.txt")).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("deep.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("upper.TXT"), b"x").unwrap();

        let err = find_first_text(dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::NoTextFound));
    }

    #[tokio::test]
    async fn test_garbage_archive_is_extract_failure() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("book.zip");
        std::fs::write(&archive, b"<!DOCTYPE html><title>oops</title>").unwrap();

        let err = extract_text_file(&archive, &dir.path().join("extracted"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ExtractFailed(_)));
        assert!(err.is_classified());
    }
}
