//! # Core Module
//!
//! The stateless foundation of gridrace: the grid data model, the uniqueness rules every
//! search step is checked against, and the puzzle-source I/O that feeds the engine.
//!
//! ## Architecture
//!
//! - **Grid Model** ([`models`]) - The 9x9 [`models::grid::Grid`] buffer and its text form
//! - **Constraint Rules** ([`rules`]) - The `is_safe` predicate and whole-grid validation
//! - **File I/O** ([`io`]) - Plain and collection puzzle files, directory loading
//!
//! Nothing in this module spawns threads or holds shared state; the [`crate::engine`]
//! layer builds all concurrency on top of these pure pieces.

pub mod io;
pub mod models;
pub mod rules;
