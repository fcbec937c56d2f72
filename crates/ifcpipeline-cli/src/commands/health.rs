//! Connectivity check.

use crate::output::{self, OutputFormat};
use ifcpipeline_core::error::AppError;

use super::Context;

/// Execute the health check
pub async fn execute(ctx: &Context) -> Result<(), AppError> {
    let client = ctx.client()?;
    let response = client.health().await?;

    match ctx.format {
        OutputFormat::Json => output::print_item(&response),
        OutputFormat::Table => {
            output::print_success(&format!(
                "Connected to {}",
                client.api().credential().base_url()
            ));
            output::print_value(&response);
        }
    }
    Ok(())
}
