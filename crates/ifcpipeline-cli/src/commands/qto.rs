//! Quantity takeoff command.

use clap::Args;

use crate::output;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::qto::QuantityTakeoffRequest;
use ifcpipeline_core::error::AppError;

use super::{Context, WaitArgs};

/// Arguments for the qto command
#[derive(Debug, Args)]
pub struct QtoArgs {
    /// Source model
    pub input: String,
    /// Output model (defaults to updating the input)
    #[arg(short, long)]
    pub output: Option<String>,
    #[command(flatten)]
    pub wait: WaitArgs,
}

/// Execute the qto command
pub async fn execute(args: &QtoArgs, ctx: &Context) -> Result<(), AppError> {
    let op = Operation::QuantityTakeoff(QuantityTakeoffRequest {
        input_file: args.input.clone(),
        output_file: args.output.clone(),
    });
    let outcome = ctx
        .client()?
        .run(&op, args.wait.run_options(&ctx.config.polling))
        .await?;
    output::print_outcome(outcome, ctx.format)
}
