//! bite: split text files into numbered chunk files and join them back

use anyhow::Result;
use bite_cli::commands::Commands;
use bite_cli::config::CliConfig;
use clap::Parser;
use std::path::PathBuf;

/// Split text files into chunk files by lines, and join them back
#[derive(Debug, Parser)]
#[command(name = "bite", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file with split/join defaults
    #[arg(long, value_name = "FILE", global = true, env = "BITE_CONFIG")]
    config: Option<PathBuf>,

    /// Suppress progress and log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    log::debug!("Arguments: {cli:?}");

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    cli.command.execute(&config, cli.quiet)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}
