use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;
use thiserror::Error;

use crate::core::models::grid::CELL_COUNT;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How a worker searches one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Plain depth-first backtracking on the worker thread.
    #[default]
    Sequential,
    /// Race the candidates of the first empty cell on the worker's own thread pool.
    BranchRace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    pub num_workers: usize,
    /// Upper bound on the wait for any single result; `None` blocks indefinitely.
    pub result_timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RacerConfig {
    pub threads_per_worker: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrecheckConfig {
    /// Puzzles with fewer givens are rejected without searching. `0` disables the check.
    pub min_clues: usize,
    pub reject_conflicting_clues: bool,
}

impl Default for PrecheckConfig {
    fn default() -> Self {
        Self {
            min_clues: 0,
            reject_conflicting_clues: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveConfig {
    pub strategy: SearchStrategy,
    pub dispatch: DispatchConfig,
    pub racer: RacerConfig,
    pub prechecks: PrecheckConfig,
    /// Searches that finish later than this are reported as timed out.
    pub time_limit: Option<Duration>,
}

impl SolveConfig {
    /// Total number of threads doing search work at full load.
    pub fn total_search_threads(&self) -> usize {
        match self.strategy {
            SearchStrategy::Sequential => self.dispatch.num_workers,
            SearchStrategy::BranchRace => {
                self.dispatch.num_workers * self.racer.threads_per_worker
            }
        }
    }
}

/// Splits the machine's logical cores evenly across `num_workers`, never below one.
pub fn default_racer_threads(num_workers: usize) -> usize {
    let cores = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    (cores / num_workers.max(1)).max(1)
}

#[derive(Default)]
pub struct SolveConfigBuilder {
    strategy: Option<SearchStrategy>,
    num_workers: Option<usize>,
    result_timeout: Option<Duration>,
    threads_per_worker: Option<usize>,
    min_clues: Option<usize>,
    reject_conflicting_clues: Option<bool>,
    time_limit: Option<Duration>,
}

impl SolveConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = Some(n);
        self
    }
    pub fn result_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.result_timeout = timeout;
        self
    }
    pub fn threads_per_worker(mut self, n: usize) -> Self {
        self.threads_per_worker = Some(n);
        self
    }
    pub fn min_clues(mut self, n: usize) -> Self {
        self.min_clues = Some(n);
        self
    }
    pub fn reject_conflicting_clues(mut self, reject: bool) -> Self {
        self.reject_conflicting_clues = Some(reject);
        self
    }
    pub fn time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn build(self) -> Result<SolveConfig, ConfigError> {
        let strategy = self
            .strategy
            .ok_or(ConfigError::MissingParameter("strategy"))?;
        let num_workers = self
            .num_workers
            .ok_or(ConfigError::MissingParameter("num_workers"))?;
        if num_workers == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "num_workers",
                reason: "at least one worker is required".to_string(),
            });
        }

        let threads_per_worker = self
            .threads_per_worker
            .unwrap_or_else(|| default_racer_threads(num_workers));
        if threads_per_worker == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "threads_per_worker",
                reason: "a branch racer needs at least one thread".to_string(),
            });
        }

        let defaults = PrecheckConfig::default();
        let min_clues = self.min_clues.unwrap_or(defaults.min_clues);
        if min_clues > CELL_COUNT {
            return Err(ConfigError::InvalidParameter {
                name: "min_clues",
                reason: format!("{} exceeds the {} cells of a grid", min_clues, CELL_COUNT),
            });
        }

        if let Some(limit) = self.time_limit {
            if limit.is_zero() {
                return Err(ConfigError::InvalidParameter {
                    name: "time_limit",
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(SolveConfig {
            strategy,
            dispatch: DispatchConfig {
                num_workers,
                result_timeout: self.result_timeout,
            },
            racer: RacerConfig { threads_per_worker },
            prechecks: PrecheckConfig {
                min_clues,
                reject_conflicting_clues: self
                    .reject_conflicting_clues
                    .unwrap_or(defaults.reject_conflicting_clues),
            },
            time_limit: self.time_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, StrDeserializer};

    #[test]
    fn strategy_names_deserialize_in_kebab_case() {
        let parse = |name: &'static str| {
            let de: StrDeserializer<ValueError> = name.into_deserializer();
            SearchStrategy::deserialize(de)
        };
        assert_eq!(parse("sequential").unwrap(), SearchStrategy::Sequential);
        assert_eq!(parse("branch-race").unwrap(), SearchStrategy::BranchRace);
        assert!(parse("BranchRace").is_err());
    }

    #[test]
    fn build_requires_strategy_and_workers() {
        assert_eq!(
            SolveConfigBuilder::new().num_workers(2).build(),
            Err(ConfigError::MissingParameter("strategy"))
        );
        assert_eq!(
            SolveConfigBuilder::new()
                .strategy(SearchStrategy::Sequential)
                .build(),
            Err(ConfigError::MissingParameter("num_workers"))
        );
    }

    #[test]
    fn build_fills_defaults() {
        let config = SolveConfigBuilder::new()
            .strategy(SearchStrategy::BranchRace)
            .num_workers(2)
            .build()
            .unwrap();
        assert_eq!(config.prechecks, PrecheckConfig::default());
        assert_eq!(config.time_limit, None);
        assert_eq!(config.dispatch.result_timeout, None);
        assert!(config.racer.threads_per_worker >= 1);
    }

    #[test]
    fn build_rejects_zero_workers_threads_and_limits() {
        let base = || {
            SolveConfigBuilder::new()
                .strategy(SearchStrategy::Sequential)
                .num_workers(1)
        };
        assert!(matches!(
            SolveConfigBuilder::new()
                .strategy(SearchStrategy::Sequential)
                .num_workers(0)
                .build(),
            Err(ConfigError::InvalidParameter {
                name: "num_workers",
                ..
            })
        ));
        assert!(matches!(
            base().threads_per_worker(0).build(),
            Err(ConfigError::InvalidParameter {
                name: "threads_per_worker",
                ..
            })
        ));
        assert!(matches!(
            base().min_clues(82).build(),
            Err(ConfigError::InvalidParameter {
                name: "min_clues",
                ..
            })
        ));
        assert!(matches!(
            base().time_limit(Some(Duration::ZERO)).build(),
            Err(ConfigError::InvalidParameter {
                name: "time_limit",
                ..
            })
        ));
    }

    #[test]
    fn total_search_threads_depends_on_strategy() {
        let sequential = SolveConfigBuilder::new()
            .strategy(SearchStrategy::Sequential)
            .num_workers(3)
            .threads_per_worker(4)
            .build()
            .unwrap();
        assert_eq!(sequential.total_search_threads(), 3);

        let racing = SolveConfig {
            strategy: SearchStrategy::BranchRace,
            ..sequential
        };
        assert_eq!(racing.total_search_threads(), 12);
    }

    #[test]
    fn default_racer_threads_never_drops_below_one() {
        assert!(default_racer_threads(1) >= 1);
        assert_eq!(default_racer_threads(usize::MAX), 1);
    }
}
