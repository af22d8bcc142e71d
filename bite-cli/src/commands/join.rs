//! Join command implementation

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::input::resolve_patterns;
use anyhow::{Context, Result};
use bite_engine::{join_chunks, ChunkSource, JoinOptions, TextEncoding};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Arguments for the join command
#[derive(Debug, Args)]
pub struct JoinArgs {
    /// Directory holding the chunk files of one split
    #[arg(value_name = "DIR", required_unless_present = "chunks", conflicts_with = "chunks")]
    pub directory: Option<PathBuf>,

    /// Chunk files or patterns (supports glob), joined in sorted order
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub chunks: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Every chunk file starts with a repeated header line
    #[arg(long)]
    pub persisted_header: bool,

    /// Emit this header instead of the one read from the first chunk file
    #[arg(long, value_name = "TEXT")]
    pub header: Option<String>,

    /// Continue when a chunk index is missing
    #[arg(long)]
    pub ignore_missing: bool,

    /// Text encoding label, e.g. utf-8 or latin1
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,
}

impl JoinArgs {
    /// Execute the join command
    pub fn execute(&self, config: &CliConfig) -> CliResult<()> {
        let options = self.join_options(&config.join)?;
        log::debug!("Join options: {options:?}");

        let source = match &self.directory {
            Some(dir) if !dir.is_dir() => {
                return Err(CliError::FileNotFound(dir.display().to_string()).into());
            }
            Some(dir) => ChunkSource::Directory(dir.clone()),
            None => ChunkSource::Files(resolve_patterns(&self.chunks)?),
        };
        let joined = join_chunks(source, &options).context("Failed to list chunk files")?;

        let lines = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                joined.write_to(&mut BufWriter::new(file))
            }
            None => joined.write_to(&mut io::stdout().lock()),
        }
        .context("Failed to join chunk files")?;

        log::info!("Joined {lines} lines");
        Ok(())
    }

    /// Layer the command-line flags over the configured defaults
    pub fn join_options(&self, defaults: &JoinOptions) -> Result<JoinOptions> {
        let mut options = defaults.clone();
        if self.persisted_header {
            options = options.persisted_header();
        }
        if let Some(header) = &self.header {
            options = options.header(header.as_str());
        }
        if self.ignore_missing {
            options = options.ignore_missing_chunks();
        }
        if let Some(label) = &self.encoding {
            options = options.encoding(TextEncoding::for_label(label)?);
        }
        Ok(options)
    }
}
