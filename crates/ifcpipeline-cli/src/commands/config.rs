//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output;
use ifcpipeline_core::error::AppError;

use super::Context;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (API key masked)
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
///
/// The configuration, flag overrides included, was validated before dispatch.
pub async fn execute(args: &ConfigArgs, ctx: &Context) -> Result<(), AppError> {
    let config = &ctx.config;

    match &args.command {
        ConfigCommand::Show => output::print_item(&config.redacted()),
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{}' is valid", ctx.config_path));
            output::print_kv("API gateway", &config.api.base_url);
            output::print_kv("API key", &config.api.masked_api_key());
            output::print_kv(
                "Polling",
                &format!(
                    "every {}s, up to {}s",
                    config.polling.interval_seconds, config.polling.timeout_seconds
                ),
            );
            output::print_kv("Log level", &config.logging.level);
            if config.api.api_key.is_empty() {
                output::print_warning("No API key set; requests will be rejected by the gateway");
            }
        }
    }

    Ok(())
}
