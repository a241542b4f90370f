//! Fetch worker: drains the work queue until it closes.

use crossbeam_channel::Receiver;
use regex::Regex;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use super::TaskReport;
use crate::fetch;
use crate::matcher;

/// Everything one worker thread needs, moved in at spawn time.
pub(super) struct WorkerContext {
    pub queue: Receiver<String>,
    pub reports: mpsc::Sender<TaskReport>,
    pub pattern: Arc<Regex>,
    pub fetch_timeout: Duration,
}

/// Worker loop: take a URL, fetch it, count matches, report the outcome.
/// Exits when the queue closes, or when the report channel is gone (which
/// only happens on teardown). A failed fetch is a report, not an exit.
pub(super) fn run(ctx: WorkerContext) {
    while let Ok(url) = ctx.queue.recv() {
        tracing::info!("Working on {}", url);
        let outcome = fetch::fetch_page(&url, ctx.fetch_timeout)
            .map(|body| matcher::count_matches(&ctx.pattern, &body));
        if ctx.reports.send(TaskReport { url, outcome }).is_err() {
            break;
        }
    }
}
