//! Sequential temp-file writer for one response body.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Writer for a temp artifact file. Bytes are appended in arrival order.
pub struct StorageWriter {
    file: File,
    temp_path: PathBuf,
    written: AtomicU64,
}

impl StorageWriter {
    /// Create (or truncate) the temp file at `temp_path`.
    pub fn create(temp_path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;
        Ok(StorageWriter {
            file,
            temp_path: temp_path.to_path_buf(),
            written: AtomicU64::new(0),
        })
    }

    /// Append `data` at the end of the file.
    pub fn append(&self, data: &[u8]) -> io::Result<()> {
        (&self.file).write_all(data)?;
        self.written.fetch_add(data.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Rename the temp file to `final_path`, replacing any previous artifact.
    /// Consumes the writer and closes the file.
    pub fn finalize(self, final_path: &Path) -> io::Result<()> {
        let StorageWriter { file, temp_path, .. } = self;
        drop(file);
        if let Err(e) = std::fs::rename(&temp_path, final_path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }

    /// Close and delete the temp file (best effort).
    pub fn discard(self) {
        let StorageWriter { file, temp_path, .. } = self;
        drop(file);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            tracing::debug!("could not remove temp file {}: {}", temp_path.display(), e);
        }
    }
}
