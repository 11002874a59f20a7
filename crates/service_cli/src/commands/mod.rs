//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod convergence;
pub mod paths;
pub mod price;

use clap::ValueEnum;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON document
    Json,
}
