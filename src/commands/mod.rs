//! Subcommand implementations
//!
//! Each module assembles the pipeline stages for one subcommand, runs
//! them, prints the summary, and hands the report back for exit-code
//! mapping in main.

pub mod all;
pub mod deps;
pub mod validate;
