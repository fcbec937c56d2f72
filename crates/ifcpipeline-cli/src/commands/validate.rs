//! IDS validation command.

use clap::Args;

use crate::output;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::tester::{ReportType, ValidationRequest};
use ifcpipeline_core::error::AppError;

use super::{Context, WaitArgs};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Model to check
    pub ifc_filename: String,
    /// IDS rules file
    pub ids_filename: String,
    /// Report file
    #[arg(short, long, default_value = "report.json")]
    pub output: String,
    /// json, html, or xlsx
    #[arg(long, default_value = "json")]
    pub report_type: ReportType,
    #[command(flatten)]
    pub wait: WaitArgs,
}

/// Execute the validate command
pub async fn execute(args: &ValidateArgs, ctx: &Context) -> Result<(), AppError> {
    let op = Operation::Validate(ValidationRequest {
        ifc_filename: args.ifc_filename.clone(),
        ids_filename: args.ids_filename.clone(),
        output_filename: args.output.clone(),
        report_type: args.report_type,
    });
    let outcome = ctx
        .client()?
        .run(&op, args.wait.run_options(&ctx.config.polling))
        .await?;
    output::print_outcome(outcome, ctx.format)
}
