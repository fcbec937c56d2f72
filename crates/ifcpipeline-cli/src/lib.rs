//! # ifcpipeline-cli
//!
//! `clap` command tree for the IFC Pipeline client. Data goes to stdout as a
//! table or JSON; diagnostics go through `tracing` to stderr.

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::OutputFormat;
