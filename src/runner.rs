//! Fan-out/fan-in orchestration over the catalog.
//!
//! One worker thread per catalog entry; failures funnel into a bounded
//! channel sized to the catalog, so no worker ever blocks on reporting.
//! The thread scope is the barrier: the run is not over while any job is
//! outstanding.

use std::path::Path;
use std::thread;

use crossbeam::channel;

use crate::catalog::MapEntry;
use crate::job::{self, JobError};
use crate::log;
use crate::logger::ProgressLine;
use crate::terrain::TerrainGenerator;

/// Completed-run counters for the final log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub maps: usize,
    pub test_maps: usize,
}

/// Process every catalog entry concurrently.
///
/// Jobs share no state and all run to completion; a failing job aborts
/// nothing else. Every collected failure is logged; the first one drained
/// is returned as the run's representative error. Drain order follows
/// completion order, which is arbitrary across the catalog.
pub fn run(
    catalog: &[MapEntry],
    generator: &dyn TerrainGenerator,
    root: &Path,
) -> Result<RunStats, JobError> {
    let maps = catalog.iter().filter(|e| !e.is_test).count();
    let test_maps = catalog.len() - maps;
    let progress = ProgressLine::new(&[("maps", maps), ("test_maps", test_maps)]);

    // Sized to the catalog: every job can report a failure without
    // waiting on the drain below.
    let (failures_tx, failures_rx) = channel::bounded(catalog.len());

    thread::scope(|scope| {
        for entry in catalog {
            let failures_tx = failures_tx.clone();
            let progress = &progress;
            scope.spawn(move || {
                if let Err(err) = job::process_map(root, entry, generator) {
                    let _ = failures_tx.send(err);
                }
                progress.inc(entry.category());
            });
        }
    });
    drop(failures_tx);
    progress.finish();

    let mut failures = failures_rx.try_iter();
    let Some(first) = failures.next() else {
        return Ok(RunStats { maps, test_maps });
    };
    for extra in failures {
        log!("error"; "{}", error_chain(&extra));
    }
    Err(first)
}

/// Render an error with its cause chain on one line.
fn error_chain(err: &JobError) -> String {
    use std::error::Error as _;

    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
