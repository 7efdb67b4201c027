//! Line-oriented identifier source.
//!
//! Reads one identifier per line, lazily and in file order. Any open or read
//! failure is returned to the caller, which treats it as fatal for the run.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::identifier::Identifier;

/// Forward-only sequence of identifiers. Blank lines produce empty identifiers.
pub struct IdSource<R> {
    lines: Lines<R>,
    origin: PathBuf,
    line_no: u64,
}

impl IdSource<BufReader<File>> {
    /// Opens the identifier list at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .await
            .with_context(|| format!("failed to open identifier list: {}", path.display()))?;
        Ok(IdSource {
            lines: BufReader::new(file).lines(),
            origin: path.to_path_buf(),
            line_no: 0,
        })
    }
}

impl<R: AsyncBufRead + Unpin> IdSource<R> {
    /// Wraps an already-open reader (`origin` is only used in error messages).
    pub fn from_reader(reader: R, origin: impl Into<PathBuf>) -> Self {
        IdSource {
            lines: reader.lines(),
            origin: origin.into(),
            line_no: 0,
        }
    }

    /// Next identifier, or `None` once the input is exhausted.
    pub async fn next_id(&mut self) -> Result<Option<Identifier>> {
        let line = self.lines.next_line().await.with_context(|| {
            format!(
                "failed to read {} after line {}",
                self.origin.display(),
                self.line_no
            )
        })?;
        Ok(line.map(|l| {
            self.line_no += 1;
            Identifier::new(l.trim())
        }))
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.line_no
    }
}
