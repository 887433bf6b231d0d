use crate::core::models::grid::Grid;
use crate::engine::config::SolveConfig;
use crate::engine::dispatch::{
    self, DispatchOutcome, SchedulerPolicy, WorkerSettings, WorkerSummary,
    ledger::DispatchLedger,
    message::{SolveResult, SolveStatus},
};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::solver::build_solvers;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    pub solved: usize,
    pub unsolvable: usize,
    pub timed_out: usize,
    pub rejected: usize,
    pub min_time: Option<Duration>,
    pub max_time: Option<Duration>,
    pub mean_time: Option<Duration>,
}

impl RunStatistics {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a SolveResult>) -> Self {
        let mut stats = Self::default();
        let mut total_time = Duration::ZERO;
        for result in results {
            match result.status {
                SolveStatus::Solved => stats.solved += 1,
                SolveStatus::Unsolvable => stats.unsolvable += 1,
                SolveStatus::TimedOut => stats.timed_out += 1,
                SolveStatus::Rejected => stats.rejected += 1,
            }
            total_time += result.elapsed;
            stats.min_time = Some(stats.min_time.map_or(result.elapsed, |t| t.min(result.elapsed)));
            stats.max_time = Some(stats.max_time.map_or(result.elapsed, |t| t.max(result.elapsed)));
        }
        let count = stats.total();
        if count > 0 {
            stats.mean_time = Some(total_time / count as u32);
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.solved + self.unsolvable + self.timed_out + self.rejected
    }
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    /// One result per puzzle, in input order.
    pub results: Vec<SolveResult>,
    /// Wall-clock time of the distributed phase.
    pub elapsed: Duration,
    pub ledger: DispatchLedger,
    pub workers: Vec<WorkerSummary>,
    pub statistics: RunStatistics,
}

pub(crate) fn worker_settings(config: &SolveConfig) -> WorkerSettings {
    WorkerSettings {
        time_limit: config.time_limit,
        prechecks: config.prechecks.clone(),
    }
}

/// Builds the worker solvers and runs one dispatch, timing only the dispatch itself.
pub(crate) fn distribute(
    tasks: Vec<Grid>,
    config: &SolveConfig,
    policy: SchedulerPolicy,
    reporter: &ProgressReporter,
) -> Result<(DispatchOutcome, Vec<WorkerSummary>, Duration), EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparing Workers",
    });
    let solvers = build_solvers(config)?;
    info!(
        workers = solvers.len(),
        strategy = ?config.strategy,
        search_threads = config.total_search_threads(),
        "Worker solvers ready."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Dispatch" });
    let start = Instant::now();
    let (outcome, workers) = dispatch::run(
        tasks,
        solvers,
        &worker_settings(config),
        policy,
        reporter,
    )?;
    let elapsed = start.elapsed();
    reporter.report(Progress::PhaseFinish);
    Ok((outcome, workers, elapsed))
}

#[instrument(skip_all, name = "solve_workflow", fields(puzzles = puzzles.len()))]
pub fn run(
    puzzles: Vec<Grid>,
    config: &SolveConfig,
    reporter: &ProgressReporter,
) -> Result<SolveReport, EngineError> {
    if puzzles.is_empty() {
        return Err(EngineError::PhaseFailed {
            phase: "Preparation",
            reason: "no puzzles to solve".to_string(),
        });
    }
    info!("Solving {} puzzle(s).", puzzles.len());

    let policy = SchedulerPolicy {
        stop_after_first_solution: false,
        result_timeout: config.dispatch.result_timeout,
    };
    let (outcome, workers, elapsed) = distribute(puzzles, config, policy, reporter)?;

    let results = outcome
        .results
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| {
                EngineError::Internal(format!("no result recorded for puzzle {}", index))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let statistics = RunStatistics::from_results(&results);

    info!(
        solved = statistics.solved,
        unsolvable = statistics.unsolvable,
        timed_out = statistics.timed_out,
        rejected = statistics.rejected,
        elapsed_secs = elapsed.as_secs_f64(),
        "Workflow complete."
    );
    Ok(SolveReport {
        results,
        elapsed,
        ledger: outcome.ledger,
        workers,
        statistics,
    })
}
