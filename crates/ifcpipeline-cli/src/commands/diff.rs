//! Model comparison command.

use clap::Args;

use crate::output;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::diff::{DiffRelationship, DiffRequest};
use ifcpipeline_core::error::AppError;

use super::{Context, WaitArgs};

/// Arguments for the diff command
#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Older model version
    pub old_file: String,
    /// Newer model version
    pub new_file: String,
    /// Diff result file
    #[arg(short, long, default_value = "diff.json")]
    pub output: String,
    /// Relationships to compare, comma-separated
    /// (aggregate, attributes, classification, container, geometry, property, type)
    #[arg(short, long, value_delimiter = ',')]
    pub relationships: Vec<DiffRelationship>,
    /// Compare every element instead of stopping at the first change
    #[arg(long)]
    pub deep: bool,
    /// Element selector limiting the comparison
    #[arg(long)]
    pub filter: Option<String>,

    #[command(flatten)]
    pub wait: WaitArgs,
}

impl DiffArgs {
    fn to_request(&self) -> DiffRequest {
        DiffRequest {
            output_file: self.output.clone(),
            relationships: self.relationships.clone(),
            is_shallow: !self.deep,
            filter_elements: self.filter.clone(),
            ..DiffRequest::new(self.old_file.clone(), self.new_file.clone())
        }
    }
}

/// Execute the diff command
pub async fn execute(args: &DiffArgs, ctx: &Context) -> Result<(), AppError> {
    let op = Operation::Diff(args.to_request());
    let outcome = ctx
        .client()?
        .run(&op, args.wait.run_options(&ctx.config.polling))
        .await?;
    output::print_outcome(outcome, ctx.format)
}
