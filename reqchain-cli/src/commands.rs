use std::path::PathBuf;

use clap::Subcommand;

use crate::args::{OutputArgs, RunArgs};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a flow file: the whole flow, one request, or a prefix
    Run {
        path: PathBuf,
        /// Execute only the request with this id
        #[arg(long)]
        request: Option<String>,
        /// Execute requests in order, stopping after this id (inclusive)
        #[arg(long = "up-to", conflicts_with = "request")]
        up_to: Option<String>,
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Execute every flow found at the given files or directories
    RunAll {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Give each flow its own response store instead of sharing one
        /// across the batch
        #[arg(long)]
        per_flow_store: bool,
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Parse and validate flow files without executing anything
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the requests of a flow
    List {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}
