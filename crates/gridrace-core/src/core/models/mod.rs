//! # Core Models Module
//!
//! Data structures shared by every layer of gridrace.
//!
//! - [`grid`] - The 9x9 [`grid::Grid`] buffer, its dimensions, and the compact text form
//!   used by tests and the command line.
//!
//! A [`grid::Grid`] is a plain value: it is moved into tasks, cloned into search
//! branches, and never shared mutably between threads.

pub mod grid;
