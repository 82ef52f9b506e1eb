//! ZIP archive parsing and extraction.
//!
//! ## Architecture
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`extractor`]: Decompression of entries to memory or disk
//! - [`select`]: Extraction of a downloaded archive and selection of its text file
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! The EOCD is read first, then the Central Directory, then each entry's
//! local header and data.
//!
//! ## Supported Features
//!
//! - ZIP64 extensions
//! - STORED and DEFLATE compression, with CRC-32 verification
//! - Shift_JIS or UTF-8 entry names
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

mod error;
mod extractor;
mod parser;
mod select;
mod structures;

pub use error::ArchiveError;
pub use extractor::ZipExtractor;
pub use parser::ZipParser;
pub use select::{extract_text_file, find_first_text};
pub use structures::*;
