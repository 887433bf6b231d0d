use super::channel::WorkerChannels;
use super::error::DispatchError;
use super::message::{SolveResult, SolveStatus, Tag, Task, WorkerMessage};
use crate::core::models::grid::Grid;
use crate::core::rules;
use crate::engine::config::PrecheckConfig;
use crate::engine::solver::GridSolver;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerSettings {
    pub time_limit: Option<Duration>,
    pub prechecks: PrecheckConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub tasks_completed: usize,
    /// Time spent searching, prechecks included.
    pub busy_time: Duration,
}

/// Returns the reason a grid should not be searched, if any.
pub fn precheck(grid: &Grid, config: &PrecheckConfig) -> Option<String> {
    if config.reject_conflicting_clues && !rules::has_consistent_clues(grid) {
        return Some("conflicting clues".to_string());
    }
    if !rules::has_minimum_clues(grid, config.min_clues) {
        return Some(format!(
            "{} clues, at least {} required",
            grid.clue_count(),
            config.min_clues
        ));
    }
    None
}

pub struct WorkerAgent {
    channels: WorkerChannels,
    solver: Box<dyn GridSolver>,
    settings: WorkerSettings,
}

impl WorkerAgent {
    pub fn new(
        channels: WorkerChannels,
        solver: Box<dyn GridSolver>,
        settings: WorkerSettings,
    ) -> Self {
        Self {
            channels,
            solver,
            settings,
        }
    }

    /// Serves tasks until the scheduler sends shutdown.
    #[instrument(skip_all, name = "worker", fields(id = self.channels.worker_id, solver = self.solver.name()))]
    pub fn run(mut self) -> Result<WorkerSummary, DispatchError> {
        let worker_id = self.channels.worker_id;
        let mut summary = WorkerSummary {
            worker_id,
            tasks_completed: 0,
            busy_time: Duration::ZERO,
        };

        loop {
            match self.channels.mailbox.probe() {
                None => return Err(DispatchError::SchedulerHungUp { worker_id }),
                Some(Tag::Shutdown) => {
                    self.channels.mailbox.take_shutdown();
                    debug!(
                        tasks = summary.tasks_completed,
                        "Shutdown received, worker exiting."
                    );
                    return Ok(summary);
                }
                Some(Tag::Task) => {
                    let task = self.channels.mailbox.take_task().ok_or_else(|| {
                        DispatchError::Protocol(format!(
                            "worker {} probed a task that was not buffered",
                            worker_id
                        ))
                    })?;
                    let result = self.process(task);

                    summary.tasks_completed += 1;
                    summary.busy_time += result.elapsed;
                    self.channels
                        .to_scheduler
                        .send(WorkerMessage::Result { worker_id, result })
                        .map_err(|_| DispatchError::SchedulerHungUp { worker_id })?;
                }
            }
        }
    }

    fn process(&self, task: Task) -> SolveResult {
        let Task { index, mut grid } = task;
        let start = Instant::now();

        if let Some(reason) = precheck(&grid, &self.settings.prechecks) {
            debug!(index, %reason, "Puzzle rejected before search.");
            return SolveResult {
                index,
                grid,
                status: SolveStatus::Rejected,
                elapsed: start.elapsed(),
            };
        }

        let solved = self.solver.solve(&mut grid);
        let elapsed = start.elapsed();
        let status = match self.settings.time_limit {
            Some(limit) if elapsed > limit => SolveStatus::TimedOut,
            _ if solved => SolveStatus::Solved,
            _ => SolveStatus::Unsolvable,
        };
        trace!(index, %status, ?elapsed, "Task finished.");

        SolveResult {
            index,
            grid,
            status,
            elapsed,
        }
    }
}
