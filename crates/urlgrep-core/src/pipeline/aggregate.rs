//! Aggregator: single consumer of worker reports.

use std::sync::mpsc::Receiver;

use super::{RunSummary, TaskReport};

/// Consume reports until the channel closes (all workers done), logging one
/// line per URL and the final total. Failed fetches never abort the run;
/// they are logged at WARN and counted separately.
pub(super) fn collect(reports: Receiver<TaskReport>) -> RunSummary {
    let mut summary = RunSummary::default();
    for report in reports.iter() {
        match report.outcome {
            Ok(count) => {
                tracing::info!("Count for {}: {}", report.url, count);
                summary.total_matches += count as u64;
                summary.completed += 1;
            }
            Err(err) => {
                tracing::warn!("Error for {}: {}", report.url, err);
                summary.failed += 1;
            }
        }
    }
    tracing::info!("Total: {}", summary.total_matches);
    summary
}
