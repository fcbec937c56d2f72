//! Job inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use ifcpipeline_core::error::AppError;

use super::Context;

/// Arguments for job commands
#[derive(Debug, Args)]
pub struct JobArgs {
    /// Job subcommand
    #[command(subcommand)]
    pub command: JobCommand,
}

/// Job subcommands
#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// Show the current status of a job
    Status {
        /// Job identifier returned on submission
        job_id: String,
    },
}

/// Execute job commands
pub async fn execute(args: &JobArgs, ctx: &Context) -> Result<(), AppError> {
    let client = ctx.client()?;

    match &args.command {
        JobCommand::Status { job_id } => {
            let job = client.job_status(job_id).await?;
            match ctx.format {
                OutputFormat::Json => output::print_item(&job),
                OutputFormat::Table => {
                    output::print_kv("Job", &job.id);
                    output::print_kv("Status", job.status.as_str());
                    if let Some(error) = &job.error {
                        output::print_kv("Error", error);
                    }
                    if let Some(result) = &job.result {
                        output::print_value(result);
                    }
                }
            }
        }
    }

    Ok(())
}
