//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Stagehand - stage multi-task plugin repositories for packaging
#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stage configured tasks into the build tree
    Build(commands::build::BuildArgs),
    /// Remove the build tree
    Clean(commands::clean::CleanArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .format_target(false)
            .try_init()
            .ok();

        match self.command {
            Commands::Build(args) => commands::build::execute(args),
            Commands::Clean(args) => commands::clean::execute(args),
        }
    }
}
