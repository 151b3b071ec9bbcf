//! Clean command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Repository root (defaults to the current directory)
    #[arg(short, long, value_name = "PATH", env = "STAGEHAND_ROOT")]
    pub root: Option<PathBuf>,

    /// Output directory to remove
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the clean command
pub fn execute(args: CleanArgs) -> Result<()> {
    use stagehand::fileops;

    let repo_root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let build_dir = args.output.unwrap_or_else(|| repo_root.join("_build"));

    fileops::remove(&build_dir)?;
    fileops::make_dir(&build_dir)?;
    Ok(())
}
