//! Tests for the fetch subcommand and its overrides.

use super::parse;
use crate::cli::{Cli, CliCommand, Overrides};
use clap::Parser;
use docfetch_core::config::FetchConfig;
use std::path::{Path, PathBuf};

fn fetch_overrides(args: &[&str]) -> Overrides {
    match parse(args).command {
        CliCommand::Fetch(o) => o,
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_defaults() {
    let cli = parse(&["docfetch", "fetch"]);
    assert!(cli.config.is_none());
    assert!(cli.log_file.is_none());
    match cli.command {
        CliCommand::Fetch(o) => {
            assert!(o.input.is_none());
            assert!(o.proxy.is_none());
            assert!(!o.no_proxy);
            assert!(o.workers.is_none());
            assert!(!o.accept_any_status);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_all_overrides() {
    let o = fetch_overrides(&[
        "docfetch",
        "fetch",
        "--input",
        "list.txt",
        "--output-dir",
        "/srv/out",
        "--endpoint",
        "http://example.com/doc?id=",
        "--proxy",
        "http://10.0.0.1:3128",
        "--workers",
        "4",
        "--queue-capacity",
        "8",
        "--timeout",
        "15",
        "--accept-any-status",
    ]);
    let mut cfg = FetchConfig::default();
    o.apply(&mut cfg);
    assert_eq!(cfg.input_path, PathBuf::from("list.txt"));
    assert_eq!(cfg.output_dir, PathBuf::from("/srv/out"));
    assert_eq!(cfg.endpoint_root, "http://example.com/doc?id=");
    assert_eq!(cfg.proxy.as_deref(), Some("http://10.0.0.1:3128"));
    assert_eq!(cfg.workers, 4);
    assert_eq!(cfg.queue_capacity, 8);
    assert_eq!(cfg.request_timeout_secs, 15);
    assert!(cfg.accept_any_status);
}

#[test]
fn no_overrides_keep_config_values() {
    let mut cfg = FetchConfig {
        workers: 7,
        ..FetchConfig::default()
    };
    let before = cfg.clone();
    Overrides::default().apply(&mut cfg);
    assert_eq!(cfg, before);
}

#[test]
fn no_proxy_clears_proxy() {
    let o = fetch_overrides(&["docfetch", "fetch", "--no-proxy"]);
    let mut cfg = FetchConfig::default();
    o.apply(&mut cfg);
    assert_eq!(cfg.proxy, None);
}

#[test]
fn proxy_and_no_proxy_conflict() {
    assert!(Cli::try_parse_from([
        "docfetch",
        "fetch",
        "--proxy",
        "http://p:1",
        "--no-proxy"
    ])
    .is_err());
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse(&[
        "docfetch",
        "fetch",
        "--config",
        "/tmp/docfetch.toml",
        "--log-file",
        "/tmp/docfetch.log",
    ]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/docfetch.toml")));
    assert_eq!(cli.log_file.as_deref(), Some(Path::new("/tmp/docfetch.log")));
}

#[test]
fn invalid_worker_count_is_rejected() {
    assert!(Cli::try_parse_from(["docfetch", "fetch", "--workers", "many"]).is_err());
}
