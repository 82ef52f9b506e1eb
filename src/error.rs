//! Error types for aozora-clean.
//!
//! Three failure kinds are *classified*: they carry a user-facing message and
//! map to a client error at the HTTP boundary. Everything else is reported
//! with a generic message and a server error, keeping internals out of the
//! response while the full cause is still logged.

use std::path::PathBuf;
use thiserror::Error;

use crate::archive::ArchiveError;

/// Result type alias for aozora-clean operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown for any failure that is not classified.
pub const UNEXPECTED_MESSAGE: &str = "予期しないエラーが発生しました。URLをご確認ください。";

/// Message shown when the convert form or API receives no URL.
pub const MISSING_URL_MESSAGE: &str = "ZIPファイルのURLを入力してください。";

/// Message shown when the download endpoint receives no URL.
pub const EMPTY_DOWNLOAD_URL_MESSAGE: &str = "URLが空です。ダウンロードできません。";

/// Main error type returned by the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote archive could not be retrieved.
    #[error("ZIPファイルのダウンロードに失敗しました。")]
    DownloadFailed(#[source] FetchError),

    /// The retrieved payload is not a usable ZIP archive.
    #[error("ZIPファイルを展開できません。")]
    ExtractFailed(#[source] ArchiveError),

    /// The archive holds no `.txt` entry.
    #[error("ZIPファイルからテキストが見つかりません。")]
    NoTextFound,

    /// The extracted text is not valid Shift_JIS.
    #[error("{} is not valid Shift_JIS", .path.display())]
    Decode {
        /// Path of the offending file inside the scratch directory
        path: PathBuf,
    },

    /// Local I/O on the scratch directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this failure is one of the user-facing classified kinds.
    pub fn is_classified(&self) -> bool {
        matches!(
            self,
            Error::DownloadFailed(_) | Error::ExtractFailed(_) | Error::NoTextFound
        )
    }

    /// HTTP status code for this error: 400 when classified, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        if self.is_classified() { 400 } else { 500 }
    }

    /// Message safe to show to the user.
    pub fn user_message(&self) -> String {
        if self.is_classified() {
            self.to_string()
        } else {
            UNEXPECTED_MESSAGE.to_string()
        }
    }
}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Self {
        Error::DownloadFailed(e)
    }
}

impl From<ArchiveError> for Error {
    fn from(e: ArchiveError) -> Self {
        match e {
            // Reading our own scratch copy failed; not the archive's fault
            ArchiveError::Io(io) => Error::Io(io),
            other => Error::ExtractFailed(other),
        }
    }
}

/// Why a download did not complete.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, DNS, TLS, timeout or body transfer failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP request failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// Writing the archive into the scratch directory failed
    #[error("failed to write archive: {0}")]
    Io(#[from] std::io::Error),
}
