//! `docfetch config` – print the effective configuration.

use anyhow::Result;
use docfetch_core::config::FetchConfig;
use std::path::Path;

pub fn run_show_config(cfg: &FetchConfig, source: &Path) -> Result<()> {
    print!("{}", render(cfg, source)?);
    Ok(())
}

fn render(cfg: &FetchConfig, source: &Path) -> Result<String> {
    let body = toml::to_string_pretty(cfg)?;
    Ok(format!("# loaded from {}\n{}", source.display(), body))
}
