//! Fetch, extract, decode and clean one Aozora Bunko archive.
//!
//! Each call gets its own scratch directory. The [`TempDir`] guard owns it, so
//! it is removed when the call returns, whichever step failed. The download
//! and the extracted entries live in sibling subdirectories so no URL can
//! make one collide with the other.

use encoding_rs::SHIFT_JIS;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::archive::extract_text_file;
use crate::error::{Error, Result};
use crate::io::HttpFetcher;
use crate::text::normalize;

/// Subdirectory of the scratch directory that receives the downloaded archive.
pub const DOWNLOAD_DIR: &str = "download";

/// Subdirectory of the scratch directory that receives the archive contents.
pub const EXTRACT_DIR: &str = "extracted";

/// Options for [`TextPipeline`]
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Upper bound for one archive download; `None` leaves it unbounded
    pub fetch_timeout: Option<Duration>,
    /// Parent of the per-call scratch directories; `None` uses the system
    /// temporary directory
    pub scratch_root: Option<PathBuf>,
}

/// The fetch → extract → decode → normalize pipeline.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent calls.
pub struct TextPipeline {
    fetcher: HttpFetcher,
    scratch_root: Option<PathBuf>,
}

impl TextPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            fetcher: HttpFetcher::new(config.fetch_timeout)?,
            scratch_root: config.scratch_root,
        })
    }

    /// Download the archive at `url` and return its cleaned text.
    ///
    /// The URL is expected to be non-empty; callers reject empty input before
    /// calling.
    pub async fn fetch_clean_text(&self, url: &str) -> Result<String> {
        let scratch = self.scratch_dir()?;
        debug!(%url, dir = ?scratch.path(), "processing archive");
        let raw_text = self.fetch_raw_text(url, scratch.path()).await;
        release(scratch).await;
        let raw_text = raw_text?;

        let text = normalize(&raw_text);
        info!(%url, chars = text.chars().count(), "archive converted");
        Ok(text)
    }

    async fn fetch_raw_text(&self, url: &str, scratch: &Path) -> Result<String> {
        let download_dir = scratch.join(DOWNLOAD_DIR);
        fs::create_dir(&download_dir).await?;
        let archive_path = self.fetcher.fetch(url, &download_dir).await?;
        let text_path = extract_text_file(&archive_path, &scratch.join(EXTRACT_DIR)).await?;
        let bytes = fs::read(&text_path).await?;
        decode_shift_jis(&bytes, &text_path)
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("aozora-");
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

/// Remove a scratch directory off the async runtime.
///
/// If the calling future is dropped before this runs, the guard's own drop
/// still removes the directory.
async fn release(scratch: TempDir) {
    let path = scratch.path().to_path_buf();
    match tokio::task::spawn_blocking(move || scratch.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(?path, error = %e, "failed to remove scratch directory"),
        Err(e) => warn!(?path, error = %e, "scratch cleanup task failed"),
    }
}

/// Fetch and clean `url` with a default [`TextPipeline`].
pub async fn fetch_clean_text(url: &str) -> Result<String> {
    TextPipeline::new(PipelineConfig::default())?
        .fetch_clean_text(url)
        .await
}

/// Strictly decode Shift_JIS bytes; any malformed sequence is an error.
pub fn decode_shift_jis(bytes: &[u8], path: &Path) -> Result<String> {
    SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| Error::Decode {
            path: path.to_path_buf(),
        })
}
