//! IFC to JSON commands.

use clap::{Args, Subcommand};

use crate::output;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::json::IfcToJsonRequest;
use ifcpipeline_core::error::AppError;

use super::{Context, WaitArgs};

/// Arguments for json commands
#[derive(Debug, Args)]
pub struct JsonArgs {
    /// JSON subcommand
    #[command(subcommand)]
    pub command: JsonCommand,
}

/// JSON subcommands
#[derive(Debug, Subcommand)]
pub enum JsonCommand {
    /// Convert a model to JSON on the service
    Convert {
        /// Source model
        filename: String,
        /// JSON output file
        output: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Print a stored conversion result
    Get {
        /// JSON file name on the service
        filename: String,
    },
}

/// Execute json commands
pub async fn execute(args: &JsonArgs, ctx: &Context) -> Result<(), AppError> {
    let client = ctx.client()?;

    match &args.command {
        JsonCommand::Convert {
            filename,
            output: output_filename,
            wait,
        } => {
            let op = Operation::IfcToJson(IfcToJsonRequest {
                filename: filename.clone(),
                output_filename: output_filename.clone(),
            });
            let outcome = client
                .run(&op, wait.run_options(&ctx.config.polling))
                .await?;
            output::print_outcome(outcome, ctx.format)
        }
        JsonCommand::Get { filename } => {
            let document = client.get_json(filename).await?;
            output::print_item(&document);
            Ok(())
        }
    }
}
