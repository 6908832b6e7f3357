//! CLI command implementations.
//!
//! Commands return their report as a string; `main` prints it.

pub mod analytics;
pub mod dataset;
