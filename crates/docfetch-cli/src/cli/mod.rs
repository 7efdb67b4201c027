//! CLI for the docfetch document fetcher.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use docfetch_core::config::{self, FetchConfig};
use std::path::{Path, PathBuf};

use commands::{run_fetch, run_show_config};

/// Top-level CLI for docfetch.
#[derive(Debug, Parser)]
#[command(name = "docfetch")]
#[command(about = "docfetch: fetch documents by identifier through a forward proxy", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/docfetch/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append logs to FILE instead of writing them to stderr.
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every identifier in the input list and save one file per identifier.
    Fetch(Overrides),

    /// Print the effective configuration as TOML.
    Config(Overrides),
}

/// Per-run overrides of config file values.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Identifier list, one per line.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Existing directory that receives the documents.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// URL prefix the identifier is appended to.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Forward proxy, e.g. http://10.0.0.1:3128.
    #[arg(long, value_name = "URL", conflicts_with = "no_proxy")]
    pub proxy: Option<String>,

    /// Connect to the endpoint directly.
    #[arg(long)]
    pub no_proxy: bool,

    /// Number of concurrent workers.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Identifiers buffered between the reader and the workers.
    #[arg(long, value_name = "N")]
    pub queue_capacity: Option<usize>,

    /// Per-request deadline in seconds (0 = none).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Save the body of non-2xx responses instead of treating them as failures.
    #[arg(long)]
    pub accept_any_status: bool,
}

impl Overrides {
    pub fn apply(&self, cfg: &mut FetchConfig) {
        if let Some(input) = &self.input {
            cfg.input_path = input.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            cfg.endpoint_root = endpoint.clone();
        }
        if let Some(proxy) = &self.proxy {
            cfg.proxy = Some(proxy.clone());
        }
        if self.no_proxy {
            cfg.proxy = None;
        }
        if let Some(workers) = self.workers {
            cfg.workers = workers;
        }
        if let Some(capacity) = self.queue_capacity {
            cfg.queue_capacity = capacity;
        }
        if let Some(timeout) = self.timeout {
            cfg.request_timeout_secs = timeout;
        }
        if self.accept_any_status {
            cfg.accept_any_status = true;
        }
    }
}

/// Loads `explicit` if given, else the default config (created on first use).
/// Returns the config and the path it came from.
fn load_config(explicit: Option<&Path>) -> Result<(FetchConfig, PathBuf)> {
    match explicit {
        Some(path) => Ok((config::load_from_path(path)?, path.to_path_buf())),
        None => Ok((config::load_or_init()?, config::config_path()?)),
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let (mut cfg, source) = load_config(self.config.as_deref())?;
        tracing::debug!("loaded config from {}: {:?}", source.display(), cfg);

        match self.command {
            CliCommand::Fetch(overrides) => {
                overrides.apply(&mut cfg);
                run_fetch(&cfg).await?;
            }
            CliCommand::Config(overrides) => {
                overrides.apply(&mut cfg);
                run_show_config(&cfg, &source)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
