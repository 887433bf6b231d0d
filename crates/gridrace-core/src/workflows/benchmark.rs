use super::solve::{self, SolveReport};
use crate::core::models::grid::Grid;
use crate::engine::config::SolveConfig;
use crate::engine::dispatch::worker::precheck;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::search;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub baseline_elapsed: Duration,
    pub baseline_solved: usize,
    pub distributed: SolveReport,
    /// Baseline time divided by distributed time.
    pub speedup: f64,
    /// Speedup per search thread.
    pub efficiency: f64,
    pub total_threads: usize,
}

/// Times a single-threaded sequential pass over `puzzles`, then the distributed run.
#[instrument(skip_all, name = "benchmark_workflow", fields(puzzles = puzzles.len()))]
pub fn run(
    puzzles: Vec<Grid>,
    config: &SolveConfig,
    reporter: &ProgressReporter,
) -> Result<BenchmarkReport, EngineError> {
    let (baseline_elapsed, baseline_solved) = sequential_baseline(&puzzles, config, reporter);
    info!(
        solved = baseline_solved,
        elapsed_secs = baseline_elapsed.as_secs_f64(),
        "Sequential baseline finished."
    );

    let distributed = solve::run(puzzles, config, reporter)?;
    let total_threads = config.total_search_threads();
    let distributed_secs = distributed.elapsed.as_secs_f64();
    let speedup = if distributed_secs > 0.0 {
        baseline_elapsed.as_secs_f64() / distributed_secs
    } else {
        0.0
    };
    let efficiency = speedup / total_threads as f64;

    info!(speedup, efficiency, total_threads, "Benchmark complete.");
    Ok(BenchmarkReport {
        baseline_elapsed,
        baseline_solved,
        distributed,
        speedup,
        efficiency,
        total_threads,
    })
}

fn sequential_baseline(
    puzzles: &[Grid],
    config: &SolveConfig,
    reporter: &ProgressReporter,
) -> (Duration, usize) {
    reporter.report(Progress::PhaseStart {
        name: "Sequential Baseline",
    });
    let start = Instant::now();
    let solved = puzzles
        .iter()
        .filter(|puzzle| precheck(puzzle, &config.prechecks).is_none())
        .filter(|puzzle| search::solve(&mut (*puzzle).clone()))
        .count();
    let elapsed = start.elapsed();
    reporter.report(Progress::PhaseFinish);
    (elapsed, solved)
}
