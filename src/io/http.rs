use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// File name used when the URL has no usable path segment
pub const DEFAULT_ARCHIVE_NAME: &str = "aozora.zip";

/// Downloads remote archives into a scratch directory.
///
/// A single GET is issued per fetch: no retries, no Range requests.
/// Redirects are followed by reqwest's default policy.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher, optionally bounding each download by `timeout`
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Download `url` into `dir`, returning the path of the saved archive
    pub async fn fetch(&self, url: &str, dir: &Path) -> Result<PathBuf, FetchError> {
        let url = Url::parse(url)?;
        let destination = dir.join(archive_file_name(&url));

        let mut resp = self.client.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        let mut file = fs::File::create(&destination).await?;
        let mut received = 0u64;
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk).await?;
            received += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(%url, bytes = received, path = ?destination, "archive downloaded");
        Ok(destination)
    }
}

/// Derive the local file name for an archive from its URL.
///
/// Uses the last non-empty path segment, falling back to
/// [`DEFAULT_ARCHIVE_NAME`].
pub fn archive_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string())
}
