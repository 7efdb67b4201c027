pub mod config;
pub mod logging;

pub mod fetch;
pub mod identifier;
pub mod pool;
pub mod queue;
pub mod source;
pub mod storage;

pub use config::FetchConfig;
pub use fetch::{CurlFetcher, Fetch, FetchError};
pub use identifier::Identifier;
pub use pool::{run_from_config, FetchPool, PoolSettings};
pub use source::IdSource;
