use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::Result;
use crate::io::ReadAt;

use super::error::ArchiveError;
use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all files in the archive
    pub async fn list_files(&self) -> std::result::Result<Vec<ZipFileEntry>, ArchiveError> {
        self.parser.list_files().await
    }

    /// Extract file data to memory, verifying its size and CRC-32
    pub async fn extract_to_memory(
        &self,
        entry: &ZipFileEntry,
    ) -> std::result::Result<Vec<u8>, ArchiveError> {
        let data_offset = self.parser.get_data_offset(entry).await?;

        if data_offset.saturating_add(entry.compressed_size) > self.parser.size() {
            return Err(ArchiveError::Truncated);
        }

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser
            .reader()
            .read_exact_at(data_offset, &mut raw)
            .await?;

        // Inflating and checksumming are CPU-bound
        let entry = entry.clone();
        tokio::task::spawn_blocking(move || decode_entry(&entry, raw))
            .await
            .map_err(std::io::Error::from)?
    }

    /// Extract file to disk
    pub async fn extract_to_file(&self, entry: &ZipFileEntry, output_path: &Path) -> Result<()> {
        // Decode before touching the disk so a bad entry leaves nothing behind
        let data = self.extract_to_memory(entry).await?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(output_path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(())
    }

    /// Extract every entry of the archive under `dest`.
    ///
    /// Directory entries become directories; file entries are written with
    /// their archive-relative path. Returns the paths of written files.
    pub async fn extract_all(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dest).await?;

        let entries = self.list_files().await?;
        let mut written = Vec::with_capacity(entries.len());

        for entry in &entries {
            let relative = entry
                .enclosed_name()
                .ok_or_else(|| ArchiveError::UnsafePath {
                    name: entry.file_name.clone(),
                })?;
            let output_path = dest.join(relative);

            if entry.is_directory {
                fs::create_dir_all(&output_path).await?;
                continue;
            }

            debug!(name = %entry.file_name, size = entry.uncompressed_size, "extracting");
            self.extract_to_file(entry, &output_path).await?;
            written.push(output_path);
        }

        Ok(written)
    }
}

/// Decompress an entry's raw bytes and check them against its directory record
fn decode_entry(
    entry: &ZipFileEntry,
    raw: Vec<u8>,
) -> std::result::Result<Vec<u8>, ArchiveError> {
    let data = match entry.compression_method {
        CompressionMethod::Stored => raw,
        CompressionMethod::Deflate => inflate(entry, &raw)?,
        CompressionMethod::Unknown(method) => {
            return Err(ArchiveError::UnsupportedCompression(method));
        }
    };

    if data.len() as u64 != entry.uncompressed_size {
        return Err(ArchiveError::SizeMismatch {
            name: entry.file_name.clone(),
            expected: entry.uncompressed_size,
            actual: data.len() as u64,
        });
    }

    let mut crc = Crc::new();
    crc.update(&data);
    if crc.sum() != entry.crc32 {
        return Err(ArchiveError::CrcMismatch {
            name: entry.file_name.clone(),
        });
    }

    Ok(data)
}

/// Inflate a raw DEFLATE stream, reading at most one byte past the declared
/// size so an oversized stream is caught without inflating all of it.
fn inflate(entry: &ZipFileEntry, raw: &[u8]) -> std::result::Result<Vec<u8>, ArchiveError> {
    let limit = entry.uncompressed_size.saturating_add(1);
    let mut data = Vec::with_capacity(entry.uncompressed_size.min(raw.len() as u64 * 8) as usize);
    DeflateDecoder::new(raw)
        .take(limit)
        .read_to_end(&mut data)
        .map_err(|_| ArchiveError::InvalidHeader("DEFLATE stream"))?;
    Ok(data)
}
