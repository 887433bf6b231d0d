use super::{load, reporter, write_grids};
use crate::cli::SolveArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use gridrace::engine::dispatch::message::SolveStatus;
use gridrace::workflows;
use gridrace::workflows::solve::SolveReport;
use tracing::{info, warn};

pub fn run(args: SolveArgs, threads: Option<usize>) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args.run, threads)?;
    let puzzles = load(&args.input)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = reporter(&progress_handler);

    info!("Invoking the solve workflow...");
    let report = workflows::solve::run(puzzles, &config, &reporter)?;

    let unverified = report
        .results
        .iter()
        .filter(|r| r.status == SolveStatus::Solved && !r.is_verified())
        .count();
    if unverified > 0 {
        warn!(
            "{} grid(s) reported as solved failed re-validation.",
            unverified
        );
    }

    let grids: Vec<_> = report.results.iter().map(|r| r.grid.clone()).collect();
    write_grids(&grids, args.output.as_deref())?;

    println!("{}", summary_line(&report, config.dispatch.num_workers));
    Ok(())
}

fn summary_line(report: &SolveReport, workers: usize) -> String {
    let stats = &report.statistics;
    format!(
        "Solved {}/{} puzzle(s) ({} unsolvable, {} timed out, {} rejected) in {:.3}s with {} worker(s).",
        stats.solved,
        stats.total(),
        stats.unsolvable,
        stats.timed_out,
        stats.rejected,
        report.elapsed.as_secs_f64(),
        workers
    )
}
