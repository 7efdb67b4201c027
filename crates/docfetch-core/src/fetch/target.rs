//! Request target derivation.

use url::Url;

use super::FetchError;
use crate::identifier::Identifier;

/// Joins `endpoint_root` and the raw identifier by plain concatenation (no
/// escaping) and parses the result.
pub fn request_url(endpoint_root: &str, id: &Identifier) -> Result<Url, FetchError> {
    let raw = format!("{}{}", endpoint_root, id.as_str());
    Url::parse(&raw).map_err(|source| FetchError::InvalidUrl { url: raw, source })
}
