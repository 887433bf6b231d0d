use super::{load, reporter, write_grids};
use crate::cli::BranchesArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use gridrace::workflows;
use tracing::{info, warn};

pub fn run(args: BranchesArgs, threads: Option<usize>) -> Result<()> {
    let config = build_config(&args.run, threads)?;
    let puzzles = load(&args.input)?;

    let total = puzzles.len();
    let puzzle = args
        .puzzle
        .checked_sub(1)
        .and_then(|index| puzzles.into_iter().nth(index))
        .ok_or_else(|| {
            CliError::Argument(format!(
                "--puzzle {} is out of range; the input holds {} puzzle(s)",
                args.puzzle, total
            ))
        })?;

    let progress_handler = CliProgressHandler::new();
    let reporter = reporter(&progress_handler);

    info!("Invoking the branch workflow on puzzle {}...", args.puzzle);
    let report = workflows::branches::run(&puzzle, &config, &reporter)?;

    match (&report.solution, report.cell, report.winning_candidate) {
        (Some(solution), Some((row, col)), Some(value)) => {
            write_grids(std::slice::from_ref(solution), args.output.as_deref())?;
            println!(
                "Solved puzzle {} via branch ({}, {}) = {} after {}/{} branch result(s) in {:.3}s.",
                args.puzzle,
                row + 1,
                col + 1,
                value,
                report.ledger.received_indices().len(),
                report.candidates.len(),
                report.elapsed.as_secs_f64()
            );
        }
        (Some(solution), _, _) => {
            write_grids(std::slice::from_ref(solution), args.output.as_deref())?;
            println!("Puzzle {} is already complete.", args.puzzle);
        }
        (None, _, _) => {
            warn!("No root branch produced a solution.");
            println!(
                "Puzzle {} has no solution: all {} branch(es) exhausted in {:.3}s.",
                args.puzzle,
                report.candidates.len(),
                report.elapsed.as_secs_f64()
            );
        }
    }
    Ok(())
}
