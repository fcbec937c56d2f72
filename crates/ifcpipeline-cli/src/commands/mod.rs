//! CLI command definitions and dispatch.

pub mod clash;
pub mod config;
pub mod convert;
pub mod csv;
pub mod diff;
pub mod files;
pub mod health;
pub mod job;
pub mod json;
pub mod options;
pub mod patch;
pub mod qto;
pub mod validate;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use ifcpipeline_client::{IfcPipelineClient, RunOptions};
use ifcpipeline_core::config::{AppConfig, PollingConfig};
use ifcpipeline_core::error::AppError;
use ifcpipeline_core::types::PollingPolicy;

/// IFC Pipeline: submit and track IFC processing jobs
#[derive(Debug, Parser)]
#[command(name = "ifcpipeline", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// API gateway URL (overrides configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key (overrides configuration)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Record failed batch items as `{"error": ...}` instead of aborting
    #[arg(long, global = true)]
    pub continue_on_fail: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check connectivity and credentials
    Health,
    /// List, upload, and download files
    Files(files::FilesArgs),
    /// Convert a model to another format
    Convert(convert::ConvertArgs),
    /// Detect clashes between groups of models
    Clash(clash::ClashArgs),
    /// Compare two model versions
    Diff(diff::DiffArgs),
    /// Export to or import from spreadsheets
    Csv(csv::CsvArgs),
    /// Run or list patch recipes
    Patch(patch::PatchArgs),
    /// Compute quantity takeoffs
    Qto(qto::QtoArgs),
    /// Validate a model against an IDS file
    Validate(validate::ValidateArgs),
    /// Convert a model to JSON or fetch a conversion result
    Json(json::JsonArgs),
    /// Inspect submitted jobs
    Job(job::JobArgs),
    /// Print selection options for files and recipes
    Options(options::OptionsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

/// Shared state for one command invocation
#[derive(Debug)]
pub struct Context {
    /// Effective configuration (file, environment, then flags)
    pub config: AppConfig,
    /// Selected output format
    pub format: OutputFormat,
    /// Batch failure policy
    pub continue_on_fail: bool,
    /// Configuration file the settings were loaded from
    pub config_path: String,
}

impl Context {
    /// Build an API client from the effective configuration
    pub fn client(&self) -> Result<IfcPipelineClient, AppError> {
        IfcPipelineClient::from_config(&self.config)
    }
}

impl Cli {
    /// Load configuration and apply command-line overrides
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        let mut config = AppConfig::load(&self.config)?;
        config.apply_overrides(self.base_url.as_deref(), self.api_key.as_deref())?;
        Ok(config)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let ctx = Context {
            config,
            format: self.format,
            continue_on_fail: self.continue_on_fail,
            config_path: self.config.clone(),
        };

        match &self.command {
            Commands::Health => health::execute(&ctx).await,
            Commands::Files(args) => files::execute(args, &ctx).await,
            Commands::Convert(args) => convert::execute(args, &ctx).await,
            Commands::Clash(args) => clash::execute(args, &ctx).await,
            Commands::Diff(args) => diff::execute(args, &ctx).await,
            Commands::Csv(args) => csv::execute(args, &ctx).await,
            Commands::Patch(args) => patch::execute(args, &ctx).await,
            Commands::Qto(args) => qto::execute(args, &ctx).await,
            Commands::Validate(args) => validate::execute(args, &ctx).await,
            Commands::Json(args) => json::execute(args, &ctx).await,
            Commands::Job(args) => job::execute(args, &ctx).await,
            Commands::Options(args) => options::execute(args, &ctx).await,
            Commands::Config(args) => config::execute(args, &ctx).await,
        }
    }
}

/// Polling flags shared by job-producing commands
#[derive(Debug, Clone, Default, Args)]
pub struct WaitArgs {
    /// Wait for the job even when the configuration disables waiting
    #[arg(long, conflicts_with = "no_wait")]
    pub wait: bool,

    /// Return right after submission instead of waiting for the job
    #[arg(long)]
    pub no_wait: bool,

    /// Seconds between status checks
    #[arg(long)]
    pub interval: Option<u64>,

    /// Seconds after submission before giving up on the job
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl WaitArgs {
    /// Merge the flags over the configured polling defaults
    pub fn run_options(&self, defaults: &PollingConfig) -> RunOptions {
        RunOptions {
            policy: PollingPolicy::new(
                self.interval.unwrap_or(defaults.interval_seconds),
                self.timeout.unwrap_or(defaults.timeout_seconds),
            ),
            wait: if self.wait {
                true
            } else {
                defaults.wait_for_completion && !self.no_wait
            },
        }
    }
}
