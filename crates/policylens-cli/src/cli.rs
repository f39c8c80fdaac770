//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use policylens_llm::ProviderKind;
use std::path::PathBuf;

/// PolicyLens CLI - Classify access-control policies as Weak or Strong.
#[derive(Debug, Parser)]
#[command(name = "policylens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a single policy file
    Classify(ClassifyArgs),

    /// Evaluate configured models against a labeled dataset
    Evaluate(EvaluateArgs),
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Path to the policy JSON document
    pub policy_file: PathBuf,

    /// Generation backend
    #[arg(short, long, value_enum)]
    pub provider: ProviderArg,

    /// Model identifier understood by the backend
    #[arg(short, long)]
    pub model: String,

    /// Environment variable holding the API credential
    /// (defaults to OPENAI_API_KEY or HF_API_TOKEN; a `.env` file in the
    /// working directory is loaded first)
    #[arg(long)]
    pub credential_env: Option<String>,

    /// Override the backend base URL
    #[arg(long, env = "POLICYLENS_BASE_URL")]
    pub base_url: Option<String>,

    /// Maximum tokens the model may generate
    #[arg(long, default_value = "300")]
    pub max_tokens: u32,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Evaluation config file (TOML); built-in models are used when absent
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Labeled dataset (overrides the config)
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Report output path (overrides the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Provider argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// Hosted chat-completions backend
    Openai,
    /// Hosted inference backend
    #[value(alias = "hf")]
    Huggingface,
}

impl From<CliFormat> for crate::output::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::output::OutputFormat::Table,
            CliFormat::Json => crate::output::OutputFormat::Json,
        }
    }
}

impl From<ProviderArg> for ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Openai => ProviderKind::OpenAi,
            ProviderArg::Huggingface => ProviderKind::HuggingFace,
        }
    }
}
