//! # Workflows Module
//!
//! End-to-end entry points that tie puzzle input, configuration and the engine together.
//!
//! - **Solve** ([`solve`]) - Distribute a puzzle set and collect one result per puzzle
//! - **Branches** ([`branches`]) - Distribute the root branches of one puzzle and stop at
//!   the first solution
//! - **Benchmark** ([`benchmark`]) - Compare a single-threaded baseline with the
//!   distributed run

pub mod benchmark;
pub mod branches;
pub mod solve;
