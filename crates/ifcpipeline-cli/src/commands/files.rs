//! File management CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use ifcpipeline_client::discovery;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::files::{DownloadFromUrlRequest, FileType};
use ifcpipeline_core::error::{AppError, ErrorKind};
use ifcpipeline_core::types::FileDescriptor;

use super::{Context, WaitArgs};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FilesArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FilesCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List files known to the service
    List,
    /// Upload a local file
    Upload {
        /// Local file path
        path: PathBuf,
        /// Upload category (ifc, ids, csv, other)
        #[arg(short = 't', long = "type", default_value = "ifc")]
        file_type: FileType,
    },
    /// Download a remote file
    Download {
        /// Remote file path, e.g. /output/ifc/model.ifc
        remote_path: String,
        /// Local destination file or directory (defaults to the remote file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Have the service fetch a file from a URL
    FromUrl {
        /// Source URL
        url: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// Path
    path: String,
    /// Extension
    extension: String,
}

impl From<FileDescriptor> for FileRow {
    fn from(file: FileDescriptor) -> Self {
        Self {
            path: file.path,
            extension: file.extension,
        }
    }
}

/// Execute file commands
pub async fn execute(args: &FilesArgs, ctx: &Context) -> Result<(), AppError> {
    let client = ctx.client()?;

    match &args.command {
        FilesCommand::List => {
            let listing = client.list_directories().await?;
            match ctx.format {
                OutputFormat::Json => output::print_item(&listing),
                OutputFormat::Table => {
                    let rows: Vec<FileRow> = discovery::flatten_listing(&listing)
                        .into_iter()
                        .map(|p| FileRow::from(FileDescriptor::from_path(p)))
                        .collect();
                    output::print_list(&rows, ctx.format);
                }
            }
        }
        FilesCommand::Upload { path, file_type } => {
            let response = client.upload(path, *file_type).await?;
            if ctx.format == OutputFormat::Table {
                output::print_success(&format!("Uploaded '{}'", path.display()));
            }
            output::print_value(&response);
        }
        FilesCommand::Download {
            remote_path,
            output: destination,
        } => {
            let file = client.download_file(remote_path).await?;
            let target = destination_path(destination.as_deref(), &file.file_name)?;

            tokio::fs::write(&target, &file.bytes).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Io,
                    format!("Failed to write '{}': {e}", target.display()),
                    e,
                )
            })?;

            match ctx.format {
                OutputFormat::Json => output::print_item(&serde_json::json!({
                    "file_name": file.file_name,
                    "mime_type": file.mime_type,
                    "size": file.bytes.len(),
                    "path": target.display().to_string(),
                })),
                OutputFormat::Table => {
                    output::print_success(&format!("Saved '{}'", target.display()));
                    output::print_kv("MIME type", file.mime_type);
                    output::print_kv("Size", &format!("{} bytes", file.bytes.len()));
                }
            }
        }
        FilesCommand::FromUrl { url, wait } => {
            let op = Operation::DownloadFromUrl(DownloadFromUrlRequest { url: url.clone() });
            let outcome = client
                .run(&op, wait.run_options(&ctx.config.polling))
                .await?;
            output::print_outcome(outcome, ctx.format)?;
        }
    }

    Ok(())
}

/// Resolve where a downloaded file is written
fn destination_path(requested: Option<&Path>, file_name: &str) -> Result<PathBuf, AppError> {
    if file_name.is_empty() {
        return Err(AppError::validation("Remote path does not name a file"));
    }
    Ok(match requested {
        Some(dir) if dir.is_dir() => dir.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            destination_path(Some(dir.path()), "model.ifc").expect("path"),
            dir.path().join("model.ifc")
        );
        assert_eq!(
            destination_path(Some(Path::new("out/copy.ifc")), "model.ifc").expect("path"),
            PathBuf::from("out/copy.ifc")
        );
        assert_eq!(
            destination_path(None, "model.ifc").expect("path"),
            PathBuf::from("model.ifc")
        );
        assert!(destination_path(None, "").is_err());
    }
}
