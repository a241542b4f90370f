//! CLI for urlgrep: read URLs from stdin, fetch them concurrently, and log
//! per-URL match counts plus a final total.

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::io::{self, BufReader};
use std::sync::Arc;
use std::time::Duration;

use urlgrep_core::config;
use urlgrep_core::pipeline::{self, PipelineOptions};

/// Count regular-expression matches across pages fetched from URLs on stdin.
///
/// URLs are read one per line until EOF or an empty line. Each flag overrides
/// the corresponding value from `~/.config/urlgrep/config.toml`.
#[derive(Debug, Parser)]
#[command(name = "urlgrep")]
#[command(about = "Count pattern matches across pages fetched from stdin URLs", long_about = None)]
pub struct Cli {
    /// Maximum number of concurrent fetch workers.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Regular expression to count in each page.
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Per-page fetch timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let worker_limit = cli.workers.unwrap_or(cfg.worker_limit);
        let timeout_secs = cli.timeout_secs.unwrap_or(cfg.fetch_timeout_secs);
        let pattern_text = cli.pattern.unwrap_or(cfg.pattern);
        let pattern = Regex::new(&pattern_text)
            .with_context(|| format!("invalid pattern {:?}", pattern_text))?;

        let opts = PipelineOptions {
            worker_limit,
            fetch_timeout: Duration::from_secs(timeout_secs),
        };

        let stdin = BufReader::new(io::stdin());
        let summary = pipeline::run(stdin, Arc::new(pattern), &opts)?;
        tracing::debug!(
            "run finished: {} completed, {} failed, {} workers",
            summary.completed,
            summary.failed,
            summary.workers_spawned
        );
        Ok(())
    }
}
