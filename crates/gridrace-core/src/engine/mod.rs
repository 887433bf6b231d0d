//! # Engine Module
//!
//! The search and distribution machinery behind every gridrace workflow.
//!
//! ## Overview
//!
//! Parallelism happens at two nested levels. The [`dispatch`] layer moves whole puzzles
//! (or independent root branches of one puzzle) between a scheduler and a set of worker
//! threads over message channels. Inside each worker, a [`solver::GridSolver`] does the
//! actual search, either plain [`search`] backtracking or a [`racer::BranchRacer`] that
//! fans the first empty cell's candidates out over a private thread pool.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Strategy, worker counts, prechecks and limits
//! - **Search** ([`search`]) - Deterministic depth-first backtracking
//! - **Branch Racing** ([`racer`]) - Shared-memory race over root candidates
//! - **Solvers** ([`solver`]) - The per-worker search abstraction
//! - **Dispatch** ([`dispatch`]) - Scheduler, worker agents, wire messages and ledger
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-level error umbrella

pub mod config;
pub mod dispatch;
pub mod error;
pub mod progress;
pub mod racer;
pub mod search;
pub mod solver;
