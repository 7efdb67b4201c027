//! Per-identifier fetch error. Logged by the worker and never propagated.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// `{endpoint root}{identifier}` is not a well-formed URL.
    #[error("invalid request URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The identifier maps to a name that cannot be a file (empty, `.`, `..`).
    #[error("identifier does not map to a usable file name")]
    InvalidFileName,
    /// Curl reported an error (proxy, connection, timeout, transfer).
    #[error("transfer failed: {0}")]
    Transfer(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    HttpStatus(u32),
    /// Temp file create/write or final rename failed.
    #[error("storage {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Storage {
            path: path.into(),
            source,
        }
    }
}
