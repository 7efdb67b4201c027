use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default endpoint root; the raw identifier is appended to it verbatim.
pub const DEFAULT_ENDPOINT_ROOT: &str =
    "http://www3.mte.gov.br/sistemas/mediador/Resumo/ResumoVisualizar?NrSolicitacao=";

/// Default forward proxy every request is routed through.
pub const DEFAULT_PROXY: &str = "http://177.185.240.241:80";

/// Global configuration loaded from `~/.config/docfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Line-delimited file of identifiers.
    pub input_path: PathBuf,
    /// Directory that receives one file per fetched identifier. Must already exist.
    pub output_dir: PathBuf,
    /// Forward proxy, `scheme://host:port` or bare `host:port` (HTTP).
    /// `None` connects directly and is written to the file as `proxy = ""`.
    #[serde(serialize_with = "write_proxy", deserialize_with = "read_proxy")]
    pub proxy: Option<String>,
    /// URL prefix the identifier is appended to.
    pub endpoint_root: String,
    /// Number of concurrent fetch workers.
    pub workers: usize,
    /// Capacity of the queue between the identifier reader and the workers.
    pub queue_capacity: usize,
    /// Overall per-request deadline in seconds; 0 disables it.
    pub request_timeout_secs: u64,
    /// Connect-phase deadline in seconds; 0 uses the transport default.
    pub connect_timeout_secs: u64,
    /// Store the body of any HTTP status instead of failing on non-2xx.
    pub accept_any_status: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("ids.txt"),
            output_dir: PathBuf::from("DATUMS"),
            proxy: Some(DEFAULT_PROXY.to_string()),
            endpoint_root: DEFAULT_ENDPOINT_ROOT.to_string(),
            workers: 10,
            queue_capacity: 10,
            request_timeout_secs: 120,
            connect_timeout_secs: 30,
            accept_any_status: false,
        }
    }
}

impl FetchConfig {
    /// Rejects settings the pool cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        if self.queue_capacity == 0 {
            anyhow::bail!("queue_capacity must be at least 1");
        }
        if self.endpoint_root.trim().is_empty() {
            anyhow::bail!("endpoint_root must not be empty");
        }
        if let Some(proxy) = self.proxy_url() {
            let candidate = if proxy.contains("://") {
                proxy.to_string()
            } else {
                format!("http://{}", proxy)
            };
            url::Url::parse(&candidate)
                .with_context(|| format!("invalid proxy URL: {}", proxy))?;
        }
        Ok(())
    }

    /// Proxy to route through, treating an empty string as "no proxy".
    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connect_timeout_secs > 0).then(|| Duration::from_secs(self.connect_timeout_secs))
    }
}

// toml has no null, so a direct connection is stored as an empty string.
fn write_proxy<S: Serializer>(proxy: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(proxy.as_deref().unwrap_or(""))
}

fn read_proxy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let proxy = String::deserialize(deserializer)?;
    Ok(Some(proxy).filter(|p| !p.trim().is_empty()))
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("docfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing keys fall back to defaults.
pub fn load_from_path(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: FetchConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    Ok(cfg)
}
