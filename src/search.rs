//! Parallel brute-force coordinator.
//!
//! The 256 work units flow through a shared channel to a fixed pool of
//! workers. The first worker whose candidate validates flips the shared
//! found flag and reports its suffix; the flag is checked between candidate
//! attempts, so outstanding work stops within one validation of wherever
//! each worker happens to be. A unit is attempted exactly once per run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::keyspace::{self, UNIT_COUNT, WorkUnit};
use crate::types::{ExpectedDigest, RecoveredArchive, SearchOutcome};
use crate::validator;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub missing_bytes: usize,
    pub workers: usize,
}

impl SearchConfig {
    pub fn new(missing_bytes: usize) -> Self {
        Self {
            missing_bytes,
            workers: num_cpus::get(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

enum SearchEvent {
    UnitDone,
    Match(Vec<u8>),
    WorkerDone,
}

/// Races all work units across the pool and returns the first accepted
/// reconstruction, or [`SearchOutcome::NotFound`] once every candidate has
/// been rejected. `progress` observes unit completions as
/// `(units_done, unit_total)`; it is not part of correctness and a winning
/// unit does not report completion.
pub fn run_search(
    truncated: &[u8],
    config: SearchConfig,
    expected: &ExpectedDigest,
    progress: Option<&dyn Fn(usize, usize)>,
) -> Result<SearchOutcome, ConfigError> {
    if truncated.is_empty() {
        return Err(ConfigError::EmptyInput);
    }
    if config.missing_bytes == 0 {
        return Err(ConfigError::NoMissingBytes);
    }
    if config.workers == 0 {
        return Err(ConfigError::NoWorkers);
    }

    info!(
        missing_bytes = config.missing_bytes,
        workers = config.workers,
        candidates = %keyspace::total_candidates(config.missing_bytes),
        "starting exhaustive search"
    );

    let (unit_tx, unit_rx) = crossbeam_channel::bounded(UNIT_COUNT);
    for unit in keyspace::work_units(config.missing_bytes) {
        // capacity equals the unit count, so the sends never block
        let _ = unit_tx.send(unit);
    }
    drop(unit_tx);

    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let found = AtomicBool::new(false);

    let winner = thread::scope(|scope| {
        for _ in 0..config.workers {
            let unit_rx = unit_rx.clone();
            let event_tx = event_tx.clone();
            let found = &found;
            scope.spawn(move || worker_loop(truncated, expected, &unit_rx, &event_tx, found));
        }
        drop(event_tx);

        let mut winner: Option<Vec<u8>> = None;
        let mut units_done = 0usize;
        let mut workers_done = 0usize;

        for event in event_rx.iter() {
            match event {
                SearchEvent::UnitDone => {
                    units_done += 1;
                    if let Some(report) = progress {
                        report(units_done, UNIT_COUNT);
                    }
                }
                SearchEvent::Match(suffix) => {
                    info!(suffix = %hex::encode(&suffix), "match found");
                    winner = Some(suffix);
                }
                SearchEvent::WorkerDone => {
                    workers_done += 1;
                    if workers_done == config.workers {
                        break;
                    }
                }
            }
        }

        winner
    });

    match winner {
        Some(suffix) => {
            let mut bytes = Vec::with_capacity(truncated.len() + suffix.len());
            bytes.extend_from_slice(truncated);
            bytes.extend_from_slice(&suffix);
            Ok(SearchOutcome::Found(RecoveredArchive { suffix, bytes }))
        }
        None => {
            info!("search space exhausted, no candidate matched");
            Ok(SearchOutcome::NotFound)
        }
    }
}

fn worker_loop(
    truncated: &[u8],
    expected: &ExpectedDigest,
    unit_rx: &Receiver<WorkUnit>,
    event_tx: &Sender<SearchEvent>,
    found: &AtomicBool,
) {
    let mut candidate = Vec::new();

    'units: for unit in unit_rx.iter() {
        if found.load(Ordering::SeqCst) {
            break;
        }

        let mut suffix = unit.first_suffix();

        loop {
            if found.load(Ordering::SeqCst) {
                break 'units;
            }

            candidate.clear();
            candidate.extend_from_slice(truncated);
            candidate.extend_from_slice(&suffix);

            if validator::check_candidate(&candidate, expected) {
                // first writer wins; losers observe the flag and stand down
                if found
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    let _ = event_tx.send(SearchEvent::Match(suffix));
                }
                break 'units;
            }

            if !keyspace::advance_suffix(&mut suffix) {
                break;
            }
        }

        debug!(first_byte = unit.first_byte, "unit exhausted");
        let _ = event_tx.send(SearchEvent::UnitDone);
    }

    let _ = event_tx.send(SearchEvent::WorkerDone);
}
