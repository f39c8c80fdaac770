//! PolicyLens CLI library.
//!
//! This library provides the core functionality for the PolicyLens command-line interface,
//! including evaluation configuration, command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod report;

pub use cli::{Cli, Command};
pub use config::{EvaluationConfig, ModelConfig};
pub use error::{CliError, Result};
pub use output::{Formatter, OutputFormat};
