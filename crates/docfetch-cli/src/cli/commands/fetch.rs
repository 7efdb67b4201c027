//! `docfetch fetch` – run the worker pool over the identifier list.

use anyhow::Result;
use docfetch_core::config::FetchConfig;
use std::time::Instant;

pub async fn run_fetch(cfg: &FetchConfig) -> Result<()> {
    tracing::info!(
        input = %cfg.input_path.display(),
        output_dir = %cfg.output_dir.display(),
        proxy = cfg.proxy_url().unwrap_or("none"),
        workers = cfg.workers,
        "starting fetch"
    );
    let started = Instant::now();
    let dispatched = docfetch_core::run_from_config(cfg).await?;
    tracing::info!(
        "processed {} identifier(s) in {:.1}s",
        dispatched,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
