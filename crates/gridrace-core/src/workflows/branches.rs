use super::solve::distribute;
use crate::core::models::grid::Grid;
use crate::core::rules;
use crate::engine::config::SolveConfig;
use crate::engine::dispatch::SchedulerPolicy;
use crate::engine::dispatch::ledger::DispatchLedger;
use crate::engine::dispatch::message::SolveResult;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::time::Duration;
use tracing::{info, instrument};

/// The root branches of a puzzle: its first empty cell and one grid per feasible value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootBranches {
    pub cell: (usize, usize),
    pub candidates: Vec<u8>,
    pub grids: Vec<Grid>,
}

/// Returns `None` when the puzzle has no empty cell.
pub fn split_root_branches(puzzle: &Grid) -> Option<RootBranches> {
    let (row, col) = puzzle.first_empty()?;
    let candidates = rules::candidates(puzzle, row, col);
    let grids = candidates
        .iter()
        .map(|&num| puzzle.with_value(row, col, num))
        .collect();
    Some(RootBranches {
        cell: (row, col),
        candidates,
        grids,
    })
}

#[derive(Debug, Clone)]
pub struct BranchReport {
    pub cell: Option<(usize, usize)>,
    pub candidates: Vec<u8>,
    /// The first solved grid to arrive, if any branch succeeded.
    pub solution: Option<Grid>,
    /// The root value of the winning branch.
    pub winning_candidate: Option<u8>,
    /// One slot per branch; branches never dispatched stay empty.
    pub results: Vec<Option<SolveResult>>,
    pub elapsed: Duration,
    pub ledger: DispatchLedger,
}

/// Solves one puzzle by distributing its root branches and stopping at the first solution.
#[instrument(skip_all, name = "branch_workflow")]
pub fn run(
    puzzle: &Grid,
    config: &SolveConfig,
    reporter: &ProgressReporter,
) -> Result<BranchReport, EngineError> {
    let Some(branches) = split_root_branches(puzzle) else {
        info!("Puzzle has no empty cell; nothing to distribute.");
        return Ok(BranchReport {
            cell: None,
            candidates: Vec::new(),
            solution: rules::is_complete_solution(puzzle).then(|| puzzle.clone()),
            winning_candidate: None,
            results: Vec::new(),
            elapsed: Duration::ZERO,
            ledger: DispatchLedger::default(),
        });
    };
    info!(
        row = branches.cell.0,
        col = branches.cell.1,
        branches = branches.candidates.len(),
        "Distributing root branches."
    );
    reporter.report(Progress::Message(format!(
        "Racing {} root branch(es) of cell ({}, {})",
        branches.candidates.len(),
        branches.cell.0 + 1,
        branches.cell.1 + 1
    )));

    let policy = SchedulerPolicy {
        stop_after_first_solution: true,
        result_timeout: config.dispatch.result_timeout,
    };
    let (outcome, _, elapsed) = distribute(branches.grids, config, policy, reporter)?;

    let winner = outcome.arrival_order.iter().copied().find(|&index| {
        outcome.results[index]
            .as_ref()
            .is_some_and(|r| r.status.is_solved())
    });
    let solution = winner.and_then(|index| outcome.results[index].as_ref().map(|r| r.grid.clone()));
    let winning_candidate = winner.map(|index| branches.candidates[index]);

    match winning_candidate {
        Some(value) => info!(value, "Root branch solved the puzzle."),
        None => info!("No root branch produced a solution."),
    }
    Ok(BranchReport {
        cell: Some(branches.cell),
        candidates: branches.candidates,
        solution,
        winning_candidate,
        results: outcome.results,
        elapsed,
        ledger: outcome.ledger,
    })
}
