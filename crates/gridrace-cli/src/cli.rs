use clap::{Args, Parser, Subcommand, ValueEnum};
use gridrace::engine::config::SearchStrategy;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "gridrace - a two-level parallel Sudoku solver: greedy puzzle dispatch across workers, branch racing inside each worker.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Number of branch-racing threads per worker.
    /// Defaults to the logical cores divided evenly across workers.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve every puzzle in a file or directory, one puzzle per task.
    Solve(SolveArgs),
    /// Solve one puzzle by distributing its root branches across workers.
    Branches(BranchesArgs),
    /// Time a single-threaded baseline against the distributed run.
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Puzzle file (plain or collection format) or a directory of `.txt` puzzle files.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the resulting grids here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct BranchesArgs {
    /// Puzzle file (plain or collection format).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Which puzzle of the file to split, counting from 1.
    #[arg(long, default_value_t = 1, value_name = "K")]
    pub puzzle: usize,

    /// Write the solved grid here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Puzzle file (plain or collection format) or a directory of `.txt` puzzle files.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Options shared by every command that runs the solver.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of worker threads receiving tasks.
    #[arg(short, long, value_name = "INT")]
    pub workers: Option<usize>,

    /// How each worker searches a grid.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Report searches that take longer than this as timed out.
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    /// Fail the run if no result arrives within this many seconds.
    #[arg(long, value_name = "SECS")]
    pub result_timeout: Option<f64>,

    /// Reject puzzles with fewer givens without searching them.
    #[arg(long, value_name = "INT")]
    pub min_clues: Option<usize>,

    /// Search puzzles whose givens already conflict instead of rejecting them.
    #[arg(long)]
    pub allow_conflicting_clues: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S dispatch.workers=4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// Plain backtracking on each worker thread.
    Sequential,
    /// Race the first open cell's candidates on each worker's thread pool.
    Race,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => SearchStrategy::Sequential,
            StrategyArg::Race => SearchStrategy::BranchRace,
        }
    }
}
