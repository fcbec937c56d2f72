//! Geometry conversion command.

use clap::Args;

use crate::output;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::convert::{ConvertOptions, ConvertRequest};
use ifcpipeline_core::error::AppError;

use super::{Context, WaitArgs};

/// Arguments for the convert command
///
/// Switches accept an optional value (`--sew-shells` or `--sew-shells false`)
/// and are only sent when given.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Source model path on the service
    pub input: String,
    /// Output path; the extension selects the format (.glb, .obj, .svg, ...)
    pub output: String,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub verbose: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub plan: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub model: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub weld_vertices: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub use_world_coords: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub convert_back_units: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub sew_shells: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub merge_boolean_operands: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub disable_opening_subtractions: Option<bool>,

    /// SVG bounds, e.g. 1024x768
    #[arg(long)]
    pub bounds: Option<String>,
    /// Comma-separated entity types to include
    #[arg(long)]
    pub include: Option<String>,
    /// Comma-separated entity types to exclude
    #[arg(long)]
    pub exclude: Option<String>,
    /// Converter log file on the service
    #[arg(long)]
    pub log_file: Option<String>,

    #[command(flatten)]
    pub wait: WaitArgs,
}

impl ConvertArgs {
    fn to_request(&self) -> ConvertRequest {
        ConvertRequest {
            input_filename: self.input.clone(),
            output_filename: self.output.clone(),
            options: ConvertOptions {
                verbose: self.verbose,
                plan: self.plan,
                model: self.model,
                weld_vertices: self.weld_vertices,
                use_world_coords: self.use_world_coords,
                convert_back_units: self.convert_back_units,
                sew_shells: self.sew_shells,
                merge_boolean_operands: self.merge_boolean_operands,
                disable_opening_subtractions: self.disable_opening_subtractions,
                bounds: self.bounds.clone(),
                include: self.include.clone(),
                exclude: self.exclude.clone(),
                log_file: self.log_file.clone(),
            },
        }
    }
}

/// Execute the convert command
pub async fn execute(args: &ConvertArgs, ctx: &Context) -> Result<(), AppError> {
    let op = Operation::Convert(args.to_request());
    let outcome = ctx
        .client()?
        .run(&op, args.wait.run_options(&ctx.config.polling))
        .await?;
    output::print_outcome(outcome, ctx.format)
}
