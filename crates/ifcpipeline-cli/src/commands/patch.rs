//! Patch recipe commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use ifcpipeline_client::batch::BatchRunner;
use ifcpipeline_client::discovery;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::patch::{PatchRequest, RawRecipeArguments, RecipeListRequest};
use ifcpipeline_client::recipes::RecipeCatalog;
use ifcpipeline_client::{IfcPipelineClient, RunOptions};
use ifcpipeline_core::error::{AppError, ErrorKind};
use ifcpipeline_core::types::RecipeDescriptor;

use super::{Context, WaitArgs};

/// Arguments for patch commands
#[derive(Debug, Args)]
pub struct PatchArgs {
    /// Patch subcommand
    #[command(subcommand)]
    pub command: PatchCommand,
}

/// Patch subcommands
#[derive(Debug, Subcommand)]
pub enum PatchCommand {
    /// Execute a recipe on a model, or a batch of executions from a JSON file
    Execute(ExecuteArgs),
    /// List available recipes
    Recipes {
        /// Leave out built-in recipes
        #[arg(long)]
        no_builtin: bool,
        /// Leave out custom recipes
        #[arg(long)]
        no_custom: bool,
    },
}

/// Arguments for a recipe execution
#[derive(Debug, Args)]
pub struct ExecuteArgs {
    /// Source model
    #[arg(short, long, required_unless_present = "batch")]
    pub input: Option<String>,
    /// Patched model
    #[arg(short, long, required_unless_present = "batch")]
    pub output: Option<String>,
    /// Recipe name
    #[arg(short, long, required_unless_present = "batch")]
    pub recipe: Option<String>,
    /// Selector query (ExtractElements)
    #[arg(short, long)]
    pub query: Option<String>,
    /// Treat assets with equal names as one (ExtractElements)
    #[arg(long)]
    pub assume_unique_by_name: Option<bool>,
    /// Target unit (ConvertLengthUnit)
    #[arg(long)]
    pub unit: Option<String>,
    /// Positional recipe argument (repeatable)
    #[arg(long = "arg")]
    pub args: Vec<String>,
    /// Whether the recipe is custom (looked up when omitted)
    #[arg(long)]
    pub custom: Option<bool>,
    /// JSON file with an array of execution requests
    #[arg(long, conflicts_with_all = ["input", "output", "recipe"])]
    pub batch: Option<PathBuf>,

    #[command(flatten)]
    pub wait: WaitArgs,
}

impl ExecuteArgs {
    fn to_request(&self) -> PatchRequest {
        PatchRequest {
            input_file: self.input.clone().unwrap_or_default(),
            output_file: self.output.clone().unwrap_or_default(),
            recipe: self.recipe.clone().unwrap_or_default(),
            arguments: RawRecipeArguments {
                query: self.query.clone(),
                assume_unique_by_name: self.assume_unique_by_name,
                unit: self.unit.clone(),
                values: self.args.clone(),
            },
            use_custom: self.custom,
        }
    }
}

/// Recipe display row
#[derive(Debug, Serialize, Tabled)]
struct RecipeRow {
    /// Name
    name: String,
    /// Built-in or custom
    kind: &'static str,
    /// Parameter count
    parameters: String,
    /// Description
    description: String,
}

impl From<&RecipeDescriptor> for RecipeRow {
    fn from(recipe: &RecipeDescriptor) -> Self {
        Self {
            name: recipe.name.clone(),
            kind: if recipe.is_custom { "custom" } else { "built-in" },
            parameters: recipe
                .parameter_count()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            description: recipe.description.clone(),
        }
    }
}

/// Execute patch commands
pub async fn execute(args: &PatchArgs, ctx: &Context) -> Result<(), AppError> {
    let client = ctx.client()?;

    match &args.command {
        PatchCommand::Execute(exec) => {
            let options = exec.wait.run_options(&ctx.config.polling);
            let mut catalog = RecipeCatalog::new();

            match &exec.batch {
                Some(path) => {
                    let requests = read_batch(path).await?;
                    run_batch(&client, &mut catalog, requests, options, ctx).await?;
                }
                None => {
                    let outcome = client
                        .execute_patch(&mut catalog, exec.to_request(), options)
                        .await?;
                    output::print_outcome(outcome, ctx.format)?;
                }
            }
        }
        PatchCommand::Recipes {
            no_builtin,
            no_custom,
        } => {
            let op = Operation::ListRecipes(RecipeListRequest {
                include_builtin: !no_builtin,
                include_custom: !no_custom,
            });
            let response = client.api().send(&op.to_request()?).await?;
            let recipes = discovery::order_recipes(discovery::normalize_recipes(&response)?);
            let rows: Vec<RecipeRow> = recipes.iter().map(RecipeRow::from).collect();
            output::print_list(&rows, ctx.format);
        }
    }

    Ok(())
}

async fn read_batch(path: &Path) -> Result<Vec<PatchRequest>, AppError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Io,
            format!("Failed to read batch file '{}': {e}", path.display()),
            e,
        )
    })?;
    parse_batch(&raw)
}

fn parse_batch(raw: &str) -> Result<Vec<PatchRequest>, AppError> {
    let requests: Vec<PatchRequest> = serde_json::from_str(raw)
        .map_err(|e| AppError::validation(format!("Invalid batch file: {e}")))?;
    if requests.is_empty() {
        return Err(AppError::validation("Batch file contains no executions"));
    }
    Ok(requests)
}

/// Run executions one after another, sharing one recipe catalog
async fn run_batch(
    client: &IfcPipelineClient,
    catalog: &mut RecipeCatalog,
    requests: Vec<PatchRequest>,
    options: RunOptions,
    ctx: &Context,
) -> Result<(), AppError> {
    let total = requests.len();
    let mut batch = BatchRunner::new(ctx.continue_on_fail);

    for (index, request) in requests.into_iter().enumerate() {
        tracing::info!(item = index + 1, total, recipe = %request.recipe, "Running batch item");
        let result = match client.execute_patch(catalog, request, options).await {
            Ok(outcome) => outcome.into_value(),
            Err(e) => Err(e),
        };
        if let (Err(e), true) = (&result, ctx.continue_on_fail) {
            output::print_error(&format!("Item {} of {total} failed: {}", index + 1, e.message));
        }
        batch.record(result)?;
    }

    let report = batch.finish();
    match ctx.format {
        OutputFormat::Json => output::print_item(&report),
        OutputFormat::Table => {
            output::print_success(&format!(
                "Batch finished: {} succeeded, {} failed",
                report.succeeded, report.failed
            ));
            output::print_item(&report.results);
        }
    }
    Ok(())
}
