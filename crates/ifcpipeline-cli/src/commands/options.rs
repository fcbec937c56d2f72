//! Selection option listings.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output;
use ifcpipeline_core::error::AppError;
use ifcpipeline_core::types::{ExtensionFilter, SelectOption};

use super::Context;

/// Arguments for options commands
#[derive(Debug, Args)]
pub struct OptionsArgs {
    /// Options subcommand
    #[command(subcommand)]
    pub command: OptionsCommand,
}

/// Options subcommands
#[derive(Debug, Subcommand)]
pub enum OptionsCommand {
    /// Files, optionally filtered by extension
    Files {
        /// Comma-separated extensions, e.g. .ifc,.ids
        #[arg(short, long, default_value = "")]
        ext: String,
    },
    /// Built-in recipes, then custom recipes
    Recipes,
}

/// Option display row
#[derive(Debug, Serialize, Tabled)]
struct OptionRow {
    /// Value
    value: String,
    /// Label
    label: String,
    /// Description
    description: String,
}

impl From<SelectOption> for OptionRow {
    fn from(option: SelectOption) -> Self {
        Self {
            value: option.value,
            label: option.label,
            description: option.description.unwrap_or_default(),
        }
    }
}

/// Execute options commands
///
/// Listing failures are shown as a placeholder option, not an error.
pub async fn execute(args: &OptionsArgs, ctx: &Context) -> Result<(), AppError> {
    let client = ctx.client()?;
    let discovery = client.discovery();

    let options = match &args.command {
        OptionsCommand::Files { ext } => discovery.list_files(&ExtensionFilter::parse(ext)).await,
        OptionsCommand::Recipes => discovery.list_recipes().await,
    };

    let rows: Vec<OptionRow> = options.into_iter().map(OptionRow::from).collect();
    output::print_list(&rows, ctx.format);
    Ok(())
}
