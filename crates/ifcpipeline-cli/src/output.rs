//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled};

use ifcpipeline_client::JobOutcome;
use ifcpipeline_core::result::AppResult;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of rows in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a serializable item as pretty JSON in either format
pub fn print_item<T: Serialize>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
    println!("{json}");
}

/// Print the result of a job-producing call.
///
/// A timed-out job is reported as a warning and returned as an error.
pub fn print_outcome(outcome: JobOutcome, format: OutputFormat) -> AppResult<()> {
    if format == OutputFormat::Json {
        print_item(&outcome);
        return outcome.into_value().map(|_| ());
    }

    match &outcome {
        JobOutcome::Completed { response } => print_value(response),
        JobOutcome::Submitted { job_id, .. } => {
            print_success(&format!("Job {job_id} submitted"));
            print_kv("Check status", &format!("ifcpipeline job status {job_id}"));
        }
        JobOutcome::Succeeded {
            job_id,
            result,
            elapsed_seconds,
        } => {
            print_success(&format!("Job {job_id} succeeded after {elapsed_seconds:.0}s"));
            print_value(result);
        }
        JobOutcome::TimedOut { job_id, .. } => {
            print_warning(&format!("Stopped waiting for job {job_id}"));
        }
    }
    outcome.into_value().map(|_| ())
}

/// Print a JSON value; bare strings are printed unquoted
pub fn print_value(value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => println!("{s}"),
        other => print_item(other),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
