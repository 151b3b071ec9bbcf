//! Build command implementation
//!
//! The build command executes the per-task staging pipeline:
//! 1. Clean the build tree
//! 2. For each selected task: validate the descriptor, write the
//!    localization artifacts, materialize externals, stage resources

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Repository root containing stagehand.json (defaults to the current
    /// directory)
    #[arg(short, long, value_name = "PATH", env = "STAGEHAND_ROOT")]
    pub root: Option<PathBuf>,

    /// Output directory for staged tasks
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Download cache root
    #[arg(long, value_name = "PATH", env = "STAGEHAND_CACHE")]
    pub cache_root: Option<PathBuf>,

    /// Only build tasks whose directory name matches this pattern
    #[arg(short, long, value_name = "PATTERN")]
    pub task: Option<String>,
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    use stagehand::builder::BuildContext;
    use stagehand::cache::CacheStore;
    use stagehand::config;

    let repo_root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let config_path = repo_root.join(config::BUILD_OPTIONS_FILE);
    if !config_path.exists() {
        anyhow::bail!("Configuration file not found: {}", config_path.display());
    }

    let build_dir = args.output.unwrap_or_else(|| repo_root.join("_build"));
    let cache_root = args.cache_root.unwrap_or_else(default_cache_root);

    let context = BuildContext::new(repo_root, build_dir, CacheStore::new(cache_root))?;
    context.clean()?;
    context.build(args.task.as_deref())?;
    Ok(())
}

/// The per-user cache directory used when none is supplied.
fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stagehand")
}
