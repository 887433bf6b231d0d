use super::{load, reporter};
use crate::cli::BenchArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use gridrace::workflows;
use gridrace::workflows::benchmark::BenchmarkReport;
use tracing::{info, warn};

pub fn run(args: BenchArgs, threads: Option<usize>) -> Result<()> {
    let config = build_config(&args.run, threads)?;
    let puzzles = load(&args.input)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = reporter(&progress_handler);

    info!("Invoking the benchmark workflow...");
    let report = workflows::benchmark::run(puzzles, &config, &reporter)?;
    if report.baseline_solved != report.distributed.statistics.solved {
        warn!(
            "Baseline solved {} puzzle(s) but the distributed run solved {}.",
            report.baseline_solved, report.distributed.statistics.solved
        );
    }

    println!("{}", summary_line(&report));
    Ok(())
}

fn summary_line(report: &BenchmarkReport) -> String {
    format!(
        "Baseline {:.3}s, distributed {:.3}s: speedup {:.2}x, efficiency {:.1}% over {} search thread(s) ({}/{} solved).",
        report.baseline_elapsed.as_secs_f64(),
        report.distributed.elapsed.as_secs_f64(),
        report.speedup,
        report.efficiency * 100.0,
        report.total_threads,
        report.distributed.statistics.solved,
        report.distributed.statistics.total()
    )
}
