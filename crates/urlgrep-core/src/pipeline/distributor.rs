//! Distributor: feeds the bounded work queue and grows the worker pool.

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, SendError, Sender};
use regex::Regex;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use super::worker::{self, WorkerContext};
use super::TaskReport;

/// Hands tasks to the worker pool and decides when the pool must grow.
///
/// Every task is written into the queue first; a worker is spawned for it
/// only while the spawn budget lasts. The budget never refills, so the pool
/// grows monotonically, one worker per early task, and never past the limit.
/// Queueing before spawning cannot deadlock: by the time the queue is full,
/// the whole budget has been spent and the pool is draining it.
pub(super) struct Distributor {
    queue: Sender<String>,
    budget: usize,
}

impl Distributor {
    pub(super) fn new(queue: Sender<String>, worker_limit: usize) -> Self {
        Self {
            queue,
            budget: worker_limit,
        }
    }

    /// Queue one task. `Ok(true)` means a worker should be spawned for it;
    /// `Ok(false)` means the existing pool will pick it up. Blocks while the
    /// queue is full.
    pub(super) fn forward(&mut self, task: String) -> Result<bool, SendError<String>> {
        self.queue.send(task)?;
        if self.budget > 0 {
            self.budget -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Drive distribution until the intake closes, then shut the pool down:
/// close the work queue, join every worker, and only then return (which
/// releases the report sender). Returns the number of workers spawned.
pub(super) fn run_distribution(
    intake: Receiver<String>,
    reports: mpsc::Sender<TaskReport>,
    pattern: Arc<Regex>,
    fetch_timeout: Duration,
    worker_limit: usize,
) -> Result<usize> {
    let (queue_tx, queue_rx) = bounded::<String>(worker_limit);
    let mut distributor = Distributor::new(queue_tx, worker_limit);
    let mut handles = Vec::new();

    for task in intake.iter() {
        match distributor.forward(task) {
            Ok(true) => {
                let ctx = WorkerContext {
                    queue: queue_rx.clone(),
                    reports: reports.clone(),
                    pattern: Arc::clone(&pattern),
                    fetch_timeout,
                };
                handles.push(std::thread::spawn(move || worker::run(ctx)));
            }
            Ok(false) => {}
            Err(_) => break,
        }
    }

    // Dropping the queue sender is what lets idle workers see the end of work.
    drop(distributor);
    drop(queue_rx);

    let spawned = handles.len();
    let mut first_panic: Option<anyhow::Error> = None;
    for h in handles {
        if let Err(e) = h.join() {
            if first_panic.is_none() {
                first_panic = Some(anyhow!("fetch worker panicked: {:?}", e));
            }
        }
    }
    if let Some(e) = first_panic {
        return Err(e);
    }
    Ok(spawned)
}
