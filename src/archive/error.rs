use std::io;
use thiserror::Error;

/// Why a payload could not be read as a ZIP archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// No End of Central Directory record was found
    #[error("not a valid ZIP file")]
    NotZip,

    /// A record signature or layout did not match the ZIP format
    #[error("invalid {0}")]
    InvalidHeader(&'static str),

    /// A record or entry extends past the end of the payload
    #[error("archive is truncated")]
    Truncated,

    #[error("unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    #[error("{name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },

    #[error("{name}: CRC-32 mismatch")]
    CrcMismatch { name: String },

    /// Entry name is absolute or escapes the destination directory
    #[error("unsafe entry path: {name}")]
    UnsafePath { name: String },

    /// Reading the saved archive failed
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for ArchiveError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            ArchiveError::Truncated
        } else {
            ArchiveError::Io(e)
        }
    }
}
