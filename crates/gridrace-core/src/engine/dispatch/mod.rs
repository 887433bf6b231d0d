//! Distributed task dispatch between one scheduler and a set of worker threads.
//!
//! The scheduler runs on the calling thread and hands out one puzzle at a time to
//! whichever worker reports back first. Workers run on their own OS threads and only
//! ever see grids by value through [`channel`] endpoints.

pub mod channel;
pub mod error;
pub mod ledger;
pub mod message;
pub mod scheduler;
pub mod worker;

pub use error::DispatchError;
pub use scheduler::{DispatchOutcome, SchedulerPolicy};
pub use worker::{WorkerSettings, WorkerSummary};

use crate::core::models::grid::Grid;
use crate::engine::progress::ProgressReporter;
use crate::engine::solver::GridSolver;
use channel::create_channels;
use scheduler::Scheduler;
use std::thread;
use tracing::{info, instrument};
use worker::WorkerAgent;

/// Distributes `tasks` over one worker thread per solver and blocks until done.
///
/// If the scheduler fails, the worker threads are left to notice the hang-up on their
/// own and are not joined.
#[instrument(skip_all, name = "dispatch", fields(tasks = tasks.len(), workers = solvers.len()))]
pub fn run(
    tasks: Vec<Grid>,
    solvers: Vec<Box<dyn GridSolver>>,
    settings: &WorkerSettings,
    policy: SchedulerPolicy,
    reporter: &ProgressReporter,
) -> Result<(DispatchOutcome, Vec<WorkerSummary>), DispatchError> {
    if solvers.is_empty() {
        return Err(DispatchError::NoWorkers);
    }

    let (scheduler_channels, worker_channels) = create_channels(solvers.len());
    let mut handles = Vec::with_capacity(solvers.len());
    for (channels, solver) in worker_channels.into_iter().zip(solvers) {
        let worker_id = channels.worker_id;
        let agent = WorkerAgent::new(channels, solver, settings.clone());
        let handle = thread::Builder::new()
            .name(format!("worker-{}", worker_id))
            .spawn(move || agent.run())
            .map_err(|e| DispatchError::Spawn {
                worker_id,
                reason: e.to_string(),
            })?;
        handles.push((worker_id, handle));
    }

    let outcome = Scheduler::new(scheduler_channels, tasks, policy, reporter).run()?;

    let mut summaries = Vec::with_capacity(handles.len());
    for (worker_id, handle) in handles {
        let summary = handle
            .join()
            .map_err(|_| DispatchError::WorkerPanicked { worker_id })??;
        summaries.push(summary);
    }
    info!(
        received = outcome.arrival_order.len(),
        skipped = outcome.ledger.skipped().len(),
        "Dispatch complete."
    );
    Ok((outcome, summaries))
}
