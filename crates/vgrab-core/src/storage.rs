//! Disk I/O and file lifecycle for downloads.
//!
//! Bytes stream sequentially into a `.part` temp file; on success the file is
//! atomically renamed to its final name, on failure it is discarded. A final
//! path never holds a partial artifact.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path
/// (e.g. `video_1.mp4` → `video_1.mp4.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Sequential writer for one download. Create, append chunks, then either
/// `finalize` (rename to the final name) or `discard` (remove the temp file).
pub struct StorageWriter {
    file: File,
    temp_path: PathBuf,
    bytes_written: u64,
}

impl StorageWriter {
    /// Create a new temp file at `temp_path`. Overwrites if the path already
    /// exists (a stale `.part` from an interrupted run).
    pub fn create(temp_path: &Path) -> Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
        Ok(StorageWriter {
            file,
            temp_path: temp_path.to_path_buf(),
            bytes_written: 0,
        })
    }

    /// Append one chunk of response body.
    pub fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.file.write_all(data)?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    /// Total bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Atomically rename the temp file to the final path. Consumes the writer
    /// and closes the file. Fails if `final_path` is on a different filesystem.
    pub fn finalize(self, final_path: &Path) -> Result<u64> {
        self.file.sync_all().context("storage sync failed")?;
        let StorageWriter {
            file,
            temp_path,
            bytes_written,
        } = self;
        // Close before rename; some platforms dislike renaming open files.
        drop(file);
        std::fs::rename(&temp_path, final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                temp_path.display(),
                final_path.display()
            )
        })?;
        Ok(bytes_written)
    }

    /// Remove the temp file after a failed transfer. Consumes the writer.
    pub fn discard(self) {
        let StorageWriter {
            file, temp_path, ..
        } = self;
        drop(file);
        if let Err(err) = std::fs::remove_file(&temp_path) {
            tracing::warn!(
                "failed to remove temp file {}: {err}",
                temp_path.display()
            );
        }
    }
}
