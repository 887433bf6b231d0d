use crate::core::models::grid::Grid;
use crate::engine::config::{SearchStrategy, SolveConfig};
use crate::engine::error::EngineError;
use crate::engine::racer::BranchRacer;
use crate::engine::search;
use tracing::debug;

/// A search routine a worker can run on its private grid.
///
/// Implementations solve in place: `true` leaves a completed grid, `false` leaves the
/// grid as it was handed in.
pub trait GridSolver: Send {
    fn name(&self) -> &'static str;

    fn solve(&self, grid: &mut Grid) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSolver;

impl GridSolver for SequentialSolver {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn solve(&self, grid: &mut Grid) -> bool {
        search::solve(grid)
    }
}

impl GridSolver for BranchRacer {
    fn name(&self) -> &'static str {
        "branch-race"
    }

    fn solve(&self, grid: &mut Grid) -> bool {
        self.race(grid).found
    }
}

/// Builds one solver per worker. Racing workers each get their own thread pool.
pub fn build_solvers(config: &SolveConfig) -> Result<Vec<Box<dyn GridSolver>>, EngineError> {
    (0..config.dispatch.num_workers)
        .map(|worker_id| -> Result<Box<dyn GridSolver>, EngineError> {
            match config.strategy {
                SearchStrategy::Sequential => Ok(Box::new(SequentialSolver)),
                SearchStrategy::BranchRace => {
                    let racer = BranchRacer::new(config.racer.threads_per_worker)?;
                    debug!(worker_id, threads = racer.threads(), "Built branch racer.");
                    Ok(Box::new(racer))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::SolveConfigBuilder;
    use crate::testing::{UNIQUE_30, UNIQUE_30_SOLUTION, grid};

    #[test]
    fn build_solvers_creates_one_per_worker_with_the_chosen_strategy() {
        let config = SolveConfigBuilder::new()
            .strategy(SearchStrategy::BranchRace)
            .num_workers(3)
            .threads_per_worker(1)
            .build()
            .unwrap();
        let solvers = build_solvers(&config).unwrap();
        assert_eq!(solvers.len(), 3);
        assert!(solvers.iter().all(|s| s.name() == "branch-race"));
    }

    #[test]
    fn racer_threads_follow_the_configured_count() {
        let racer = BranchRacer::new(3).unwrap();
        assert_eq!(racer.threads(), 3);
    }

    #[test]
    fn both_solvers_agree_on_a_unique_puzzle() {
        let racer = BranchRacer::new(2).unwrap();
        let solvers: [&dyn GridSolver; 2] = [&SequentialSolver, &racer];
        for solver in solvers {
            let mut puzzle = grid(UNIQUE_30);
            assert!(solver.solve(&mut puzzle), "{} failed", solver.name());
            assert_eq!(puzzle, grid(UNIQUE_30_SOLUTION));
        }
    }
}
