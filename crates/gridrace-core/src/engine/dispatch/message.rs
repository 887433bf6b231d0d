use crate::core::models::grid::Grid;
use crate::core::rules::is_complete_solution;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub index: usize,
    pub grid: Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    Solved,
    Unsolvable,
    /// The search finished after the per-puzzle time limit.
    TimedOut,
    /// A precheck failed and no search was run.
    Rejected,
}

impl SolveStatus {
    pub fn is_solved(self) -> bool {
        self == SolveStatus::Solved
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolveStatus::Solved => "solved",
            SolveStatus::Unsolvable => "unsolvable",
            SolveStatus::TimedOut => "timed out",
            SolveStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub index: usize,
    pub grid: Grid,
    pub status: SolveStatus,
    /// Wall-clock time the worker spent on this task.
    pub elapsed: Duration,
}

impl SolveResult {
    /// `true` when the status claims a solution and the grid really is one.
    pub fn is_verified(&self) -> bool {
        self.status.is_solved() && is_complete_solution(&self.grid)
    }
}

/// Control tag of a scheduler-to-worker message, readable without taking the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Task,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Envelope {
    Task(Task),
    Shutdown,
}

impl Envelope {
    pub fn tag(&self) -> Tag {
        match self {
            Envelope::Task(_) => Tag::Task,
            Envelope::Shutdown => Tag::Shutdown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    Result {
        worker_id: usize,
        result: SolveResult,
    },
}
