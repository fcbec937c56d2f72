//! Spreadsheet export and import commands.

use clap::{Args, Subcommand};

use crate::output;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::csv::{CsvExportRequest, CsvFormat, CsvImportRequest};
use ifcpipeline_core::error::AppError;

use super::{Context, WaitArgs};

/// Arguments for csv commands
#[derive(Debug, Args)]
pub struct CsvArgs {
    /// CSV subcommand
    #[command(subcommand)]
    pub command: CsvCommand,
}

/// CSV subcommands
#[derive(Debug, Subcommand)]
pub enum CsvCommand {
    /// Export model data to csv, xlsx, or ods
    Export {
        /// Source model
        filename: String,
        /// Output spreadsheet
        output: String,
        /// csv, xlsx, or ods
        #[arg(long = "export-format")]
        format: Option<CsvFormat>,
        #[arg(long)]
        delimiter: Option<String>,
        /// Placeholder for missing values
        #[arg(long = "null")]
        null_value: Option<String>,
        /// Element selector query
        #[arg(short, long)]
        query: Option<String>,
        /// Comma-separated attributes to export
        #[arg(long)]
        attributes: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Apply spreadsheet edits back to a model
    Import {
        /// Model to update
        ifc_filename: String,
        /// Edited spreadsheet
        csv_filename: String,
        /// Output model (defaults to updating the input)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

/// Execute csv commands
pub async fn execute(args: &CsvArgs, ctx: &Context) -> Result<(), AppError> {
    let (op, wait) = match &args.command {
        CsvCommand::Export {
            filename,
            output,
            format,
            delimiter,
            null_value,
            query,
            attributes,
            wait,
        } => (
            Operation::CsvExport(CsvExportRequest {
                filename: filename.clone(),
                output_filename: output.clone(),
                format: *format,
                delimiter: delimiter.clone(),
                null_value: null_value.clone(),
                query: query.clone(),
                attributes: attributes.clone(),
            }),
            wait,
        ),
        CsvCommand::Import {
            ifc_filename,
            csv_filename,
            output,
            wait,
        } => (
            Operation::CsvImport(CsvImportRequest {
                ifc_filename: ifc_filename.clone(),
                csv_filename: csv_filename.clone(),
                output_filename: output.clone(),
            }),
            wait,
        ),
    };

    let outcome = ctx
        .client()?
        .run(&op, wait.run_options(&ctx.config.polling))
        .await?;
    output::print_outcome(outcome, ctx.format)
}
