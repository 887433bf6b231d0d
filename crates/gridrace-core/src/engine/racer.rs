use crate::core::models::grid::Grid;
use crate::core::rules;
use crate::engine::error::EngineError;
use crate::engine::search;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, instrument, trace, warn};

/// Counters collected during one race.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceReport {
    /// The cell whose candidates were raced; `None` when the grid was already full.
    pub cell: Option<(usize, usize)>,
    pub candidates: Vec<u8>,
    pub branches_started: usize,
    /// Branches that saw the found flag already set and never searched.
    pub branches_skipped: usize,
    pub branches_succeeded: usize,
    /// Number of times a branch wrote into the destination grid. Always 0 or 1.
    pub commits: usize,
    pub found: bool,
}

/// Races the candidates of the first empty cell on a private thread pool.
///
/// Each candidate is one unit of work with its own copy of the grid. Units are pulled
/// one at a time by idle threads, since branch cost varies wildly. A unit polls the
/// found flag before it starts searching, but a search already in progress always runs
/// to completion; only the first success is committed.
pub struct BranchRacer {
    pool: ThreadPool,
    threads: usize,
}

impl BranchRacer {
    pub fn new(threads: usize) -> Result<Self, EngineError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("racer-{}", i))
            .build()
            .map_err(|e| {
                EngineError::Initialization(format!("Failed to build branch racer pool: {}", e))
            })?;
        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Solves `grid` in place by racing root branches.
    ///
    /// On success the grid holds the first committed completion. On failure it is left
    /// unchanged. With several valid completions, which one wins depends on thread
    /// timing.
    #[instrument(skip_all, name = "branch_race", fields(threads = self.threads))]
    pub fn race(&self, grid: &mut Grid) -> RaceReport {
        let Some((row, col)) = grid.first_empty() else {
            trace!("Grid is already full, nothing to race.");
            return RaceReport {
                found: true,
                ..RaceReport::default()
            };
        };

        let candidates = rules::candidates(grid, row, col);
        if candidates.is_empty() {
            debug!(row, col, "First empty cell has no feasible candidate.");
            return RaceReport {
                cell: Some((row, col)),
                ..RaceReport::default()
            };
        }

        let origin = grid.clone();
        let found = AtomicBool::new(false);
        let destination = Mutex::new(grid);
        let started = AtomicUsize::new(0);
        let skipped = AtomicUsize::new(0);
        let succeeded = AtomicUsize::new(0);
        let commits = AtomicUsize::new(0);

        self.pool.install(|| {
            candidates.par_iter().with_max_len(1).for_each(|&num| {
                if found.load(Ordering::Acquire) {
                    skipped.fetch_add(1, Ordering::Relaxed);
                    trace!(num, "Skipping branch, a solution is already committed.");
                    return;
                }
                started.fetch_add(1, Ordering::Relaxed);

                let mut branch = origin.with_value(row, col, num);
                if !search::solve_from(&mut branch, row, col + 1) {
                    trace!(num, "Branch exhausted without a solution.");
                    return;
                }
                succeeded.fetch_add(1, Ordering::Relaxed);

                let Ok(mut target) = destination.lock() else {
                    warn!("Race destination mutex was poisoned. Dropping branch result.");
                    return;
                };
                if !found.load(Ordering::Acquire) {
                    **target = branch;
                    found.store(true, Ordering::Release);
                    commits.fetch_add(1, Ordering::Relaxed);
                    trace!(num, "Branch committed its solution.");
                }
            });
        });

        let report = RaceReport {
            cell: Some((row, col)),
            candidates,
            branches_started: started.into_inner(),
            branches_skipped: skipped.into_inner(),
            branches_succeeded: succeeded.into_inner(),
            commits: commits.into_inner(),
            found: found.into_inner(),
        };
        debug!(
            started = report.branches_started,
            skipped = report.branches_skipped,
            succeeded = report.branches_succeeded,
            found = report.found,
            "Branch race finished."
        );
        report
    }
}
