use gridrace::engine::config::SearchStrategy;
use std::num::NonZeroUsize;
use std::thread;

pub struct DefaultsConfig {
    pub strategy: SearchStrategy,
    pub workers: usize,
    pub result_timeout_secs: Option<f64>,
    pub time_limit_secs: Option<f64>,
    pub min_clues: usize,
    pub reject_conflicting_clues: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let cores = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self {
            strategy: SearchStrategy::BranchRace,
            workers: (cores / 2).max(1),
            result_timeout_secs: None,
            time_limit_secs: None,
            min_clues: 0,
            reject_conflicting_clues: true,
        }
    }
}
