//! The fetch-and-count pipeline: a task source feeding a distributor, a
//! lazily grown pool of fetch workers, and a single aggregator.
//!
//! Data flows through three channels:
//! - a bounded intake channel from the source to the distributor,
//! - the bounded work queue (capacity = worker limit) the pool drains,
//! - the report channel every worker sends results on.
//!
//! Shutdown is driven by channel closure end to end. The source closing the
//! intake lets the distributor finish; the distributor dropping the work
//! queue's sender lets idle workers exit; and the report channel closes only
//! after the distributor has joined every worker, so the aggregator cannot
//! stop while a result is still in flight.

mod aggregate;
mod distributor;
mod source;
mod worker;

use anyhow::{anyhow, Result};
use regex::Regex;
use std::io::BufRead;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use crate::fetch::FetchError;

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Upper bound on concurrent fetch workers; also the work queue capacity.
    pub worker_limit: usize,
    /// Per-page fetch timeout.
    pub fetch_timeout: Duration,
}

/// Outcome of one task: the match count for the page, or the fetch error.
#[derive(Debug)]
pub(crate) struct TaskReport {
    pub url: String,
    pub outcome: Result<usize, FetchError>,
}

/// Totals for a completed run.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    /// Sum of match counts over successfully fetched pages.
    pub total_matches: u64,
    /// Pages fetched and counted.
    pub completed: usize,
    /// Pages that failed to fetch.
    pub failed: usize,
    /// Worker threads actually spawned (at most the configured limit).
    pub workers_spawned: usize,
}

/// Run the pipeline to completion: read newline-delimited URLs from `input`
/// until EOF or an empty line, fetch each with at most `opts.worker_limit`
/// concurrent workers, and return the aggregated totals once every worker
/// has exited.
pub fn run<R>(input: R, pattern: Arc<Regex>, opts: &PipelineOptions) -> Result<RunSummary>
where
    R: BufRead + Send + 'static,
{
    let worker_limit = opts.worker_limit.max(1);
    let fetch_timeout = opts.fetch_timeout;

    let (intake_tx, intake_rx) = crossbeam_channel::bounded::<String>(worker_limit);
    let (report_tx, report_rx) = mpsc::channel::<TaskReport>();

    let reader = std::thread::spawn(move || source::read_tasks(input, intake_tx));

    let pool_pattern = Arc::clone(&pattern);
    let pool = std::thread::spawn(move || {
        distributor::run_distribution(
            intake_rx,
            report_tx,
            pool_pattern,
            fetch_timeout,
            worker_limit,
        )
    });

    let aggregator = std::thread::spawn(move || aggregate::collect(report_rx));

    reader
        .join()
        .map_err(|e| anyhow!("task source thread panicked: {:?}", e))?;
    // The pool result is checked only after the aggregator has been joined,
    // so every thread is reaped even when a worker panicked.
    let pool_result = pool
        .join()
        .map_err(|e| anyhow!("distributor thread panicked: {:?}", e))?;
    let mut summary = aggregator
        .join()
        .map_err(|e| anyhow!("aggregator thread panicked: {:?}", e))?;
    summary.workers_spawned = pool_result?;
    Ok(summary)
}
