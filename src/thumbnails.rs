pub mod canvas;
pub mod pipeline;

use crate::config::RunConfiguration;
use crate::pool::WorkerPool;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Tally of one batch run. `attempted == written + failed` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items taken off the queue by a worker.
    pub attempted: usize,
    /// Items whose thumbnail was written completely.
    pub written: usize,
    /// Items that were skipped after a logged failure or panic.
    pub failed: usize,
}

/// Generates a thumbnail for every path in `items` on `pool`, blocking until
/// all of them have been attempted.
///
/// Failures are logged per item and only show up here as counts; a batch
/// where nothing succeeds still returns normally.
pub fn run_batch<I>(items: I, config: &RunConfiguration, pool: &WorkerPool) -> BatchSummary
where
    I: IntoIterator<Item = PathBuf>,
{
    let written = AtomicUsize::new(0);

    let attempted = pool.run(items, |path: &PathBuf| {
        if pipeline::process_one(path, config).is_some() {
            written.fetch_add(1, Ordering::Relaxed);
        }
    });

    let written = written.into_inner();
    BatchSummary {
        attempted,
        written,
        failed: attempted - written,
    }
}
