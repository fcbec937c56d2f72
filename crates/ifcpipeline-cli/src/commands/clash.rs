//! Clash detection command.

use clap::Args;

use crate::output;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::clash::{ClashFile, ClashMode, ClashOptions, ClashRequest};
use ifcpipeline_core::error::AppError;

use super::{Context, WaitArgs};

/// Arguments for the clash command
///
/// Group members are written as `file[|selector[|mode]]`, where mode is
/// `i` (include) or `e` (exclude).
#[derive(Debug, Args)]
pub struct ClashArgs {
    /// Files in group A (repeatable)
    #[arg(short = 'a', long = "group-a", required = true)]
    pub group_a: Vec<ClashFile>,
    /// Files in group B (repeatable; empty checks A against itself)
    #[arg(short = 'b', long = "group-b")]
    pub group_b: Vec<ClashFile>,
    /// Clash result file
    #[arg(short, long, default_value = "clashes.json")]
    pub output: String,
    /// Clash set name
    #[arg(long, default_value = "Clash Set 1")]
    pub name: String,

    #[arg(long)]
    pub tolerance: Option<f64>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub smart_grouping: Option<bool>,
    #[arg(long)]
    pub max_cluster_distance: Option<f64>,
    /// intersection, collision, or clearance
    #[arg(long)]
    pub mode: Option<ClashMode>,
    #[arg(long)]
    pub clearance: Option<f64>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub check_all: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub allow_touching: Option<bool>,

    #[command(flatten)]
    pub wait: WaitArgs,
}

impl ClashArgs {
    fn to_request(&self) -> ClashRequest {
        ClashRequest {
            clash_set_name: self.name.clone(),
            output_filename: self.output.clone(),
            group_a: self.group_a.clone(),
            group_b: self.group_b.clone(),
            options: ClashOptions {
                tolerance: self.tolerance,
                smart_grouping: self.smart_grouping,
                max_cluster_distance: self.max_cluster_distance,
                mode: self.mode,
                clearance: self.clearance,
                check_all: self.check_all,
                allow_touching: self.allow_touching,
            },
        }
    }
}

/// Execute the clash command
pub async fn execute(args: &ClashArgs, ctx: &Context) -> Result<(), AppError> {
    let op = Operation::Clash(args.to_request());
    let outcome = ctx
        .client()?
        .run(&op, args.wait.run_options(&ctx.config.polling))
        .await?;
    output::print_outcome(outcome, ctx.format)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ifcpipeline_client::operations::clash::SelectorMode;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ClashArgs,
    }

    #[test]
    fn test_parse_groups() {
        let h = Harness::try_parse_from([
            "clash",
            "-a",
            "arch.ifc|IfcWall|i",
            "-a",
            "struct.ifc",
            "-b",
            "mep.ifc|IfcFlowSegment|e",
            "--mode",
            "collision",
        ])
        .expect("parse");
        let req = h.args.to_request();
        assert_eq!(req.group_a.len(), 2);
        assert_eq!(req.group_b[0].mode, Some(SelectorMode::Exclude));
        assert_eq!(req.options.mode, Some(ClashMode::Collision));
        assert_eq!(req.clash_set_name, "Clash Set 1");
    }

    #[test]
    fn test_group_a_required() {
        assert!(Harness::try_parse_from(["clash", "-b", "mep.ifc"]).is_err());
    }
}
