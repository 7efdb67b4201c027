//! Artifact files: streamed into a hidden temp file, then renamed into place.
//!
//! A failed fetch never leaves a file under the artifact's final name.

mod writer;

pub use writer::StorageWriter;

use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Temp path for `file_name` in `dir`, unique per worker so that duplicate
/// identifiers fetched concurrently never share a temp file
/// (e.g. `MR1-2008` → `.MR1-2008.w3.part`).
pub fn temp_path(dir: &Path, file_name: &str, worker: usize) -> PathBuf {
    dir.join(format!(".{}.w{}{}", file_name, worker, TEMP_SUFFIX))
}
