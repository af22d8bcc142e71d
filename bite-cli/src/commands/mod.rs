//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliResult;
use clap::Subcommand;

pub mod join;
pub mod split;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split a text file into numbered chunk files
    Split(split::SplitArgs),

    /// Join chunk files back into one file
    Join(join::JoinArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self, config: &CliConfig, quiet: bool) -> CliResult<()> {
        match self {
            Commands::Split(args) => args.execute(config, quiet),
            Commands::Join(args) => args.execute(config),
        }
    }
}
