//! Fetch-and-persist for a single identifier.
//!
//! Uses the curl crate (libcurl) for one GET through the configured forward
//! proxy and streams the body into a temp file that is renamed into the
//! output directory once the transfer has succeeded.

mod error;
pub mod target;

pub use error::FetchError;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::FetchConfig;
use crate::identifier::Identifier;
use crate::storage::{self, StorageWriter};

/// Redirect hops followed before the transfer fails.
const MAX_REDIRECTS: u32 = 10;

/// One blocking fetch-and-store step, shared by all workers.
///
/// `worker` is the index of the calling worker; implementations use it to keep
/// concurrent work on the same identifier apart.
pub trait Fetch: Send + Sync + 'static {
    /// Fetches `id` and stores the artifact; returns its path.
    fn fetch(&self, id: &Identifier, worker: usize) -> Result<PathBuf, FetchError>;
}

/// Fetcher backed by a fresh curl easy handle per request.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    endpoint_root: String,
    proxy: Option<String>,
    output_dir: PathBuf,
    request_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    accept_any_status: bool,
}

impl CurlFetcher {
    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            endpoint_root: cfg.endpoint_root.clone(),
            proxy: cfg.proxy_url().map(str::to_string),
            output_dir: cfg.output_dir.clone(),
            request_timeout: cfg.request_timeout(),
            connect_timeout: cfg.connect_timeout(),
            accept_any_status: cfg.accept_any_status,
        }
    }

    /// Performs the GET, handing each body chunk to `sink`. A sink error
    /// aborts the transfer and is reported against `sink_path`.
    fn get_into<W>(&self, url: &str, mut sink: W, sink_path: &Path) -> Result<u32, FetchError>
    where
        W: FnMut(&[u8]) -> io::Result<()>,
    {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        // An empty proxy string disables proxying entirely, including *_proxy env vars.
        easy.proxy(self.proxy.as_deref().unwrap_or(""))?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.request_timeout {
            easy.timeout(t)?;
        }

        let mut write_error: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match sink(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_error {
            return Err(FetchError::storage(sink_path, e));
        }
        performed?;

        let code = easy.response_code()?;
        if !self.accept_any_status && !(200..300).contains(&code) {
            return Err(FetchError::HttpStatus(code));
        }
        Ok(code)
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, id: &Identifier, worker: usize) -> Result<PathBuf, FetchError> {
        let url = target::request_url(&self.endpoint_root, id)?;
        let Some(file_name) = id.file_name() else {
            // Still requested; the body is dropped since it has nowhere to go.
            tracing::trace!(%id, worker, url = %url, "fetching");
            let code = self.get_into(url.as_str(), |_| Ok(()), &self.output_dir)?;
            tracing::debug!(%id, status = code, "no usable file name");
            return Err(FetchError::InvalidFileName);
        };
        let final_path = self.output_dir.join(&file_name);
        let temp_path = storage::temp_path(&self.output_dir, &file_name, worker);

        let writer =
            StorageWriter::create(&temp_path).map_err(|e| FetchError::storage(&temp_path, e))?;
        tracing::trace!(%id, worker, url = %url, "fetching");
        let code = match self.get_into(url.as_str(), |data| writer.append(data), &temp_path) {
            Ok(code) => code,
            Err(e) => {
                writer.discard();
                return Err(e);
            }
        };

        tracing::trace!(%id, worker, "writing");
        let bytes = writer.bytes_written();
        writer
            .finalize(&final_path)
            .map_err(|e| FetchError::storage(&final_path, e))?;
        tracing::debug!(%id, status = code, bytes, path = %final_path.display(), "stored");
        Ok(final_path)
    }
}
