//! IFC Pipeline command-line client entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use ifcpipeline_cli::Cli;
use ifcpipeline_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(config).await {
        tracing::debug!(kind = %e.kind, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber on stderr so stdout stays machine-readable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
