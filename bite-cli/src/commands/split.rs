//! Split command implementation

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use bite_engine::{ChunkFileWriter, IndexFormat, SplitInput, SplitOptions, TextEncoding};
use clap::Args;
use std::io;
use std::path::PathBuf;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Directory for the chunk files (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Data lines per chunk file [default: 1000]
    #[arg(short = 'n', long, value_name = "LINES")]
    pub lines: Option<usize>,

    /// Repeat the first input line at the top of every chunk file
    #[arg(long, conflicts_with = "header")]
    pub header_from_input: bool,

    /// Write this header line at the top of every chunk file
    #[arg(long, value_name = "TEXT")]
    pub header: Option<String>,

    /// Chunk index format in file names, e.g. 04d
    #[arg(long, value_name = "FORMAT")]
    pub index_format: Option<String>,

    /// Text encoding label, e.g. utf-8 or latin1
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Listing format for the written chunk files
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self, config: &CliConfig, quiet: bool) -> CliResult<()> {
        if !self.input.is_file() {
            return Err(CliError::FileNotFound(self.input.display().to_string()).into());
        }
        let options = self.split_options(&config.split)?;

        log::info!(
            "Splitting {} into {} ({} lines per chunk)",
            self.input.display(),
            self.output.display(),
            options.lines_per_chunk
        );
        log::debug!("Split options: {options:?}");

        let writer = ChunkFileWriter::new(SplitInput::from_file(&self.input), &self.output, &options)
            .with_context(|| format!("Failed to split {}", self.input.display()))?;

        let mut progress = ProgressReporter::new(quiet);
        progress.init_split(&self.input);
        let mut formatter = self.format.formatter(io::stdout());

        for path in writer {
            let path = path.with_context(|| format!("Failed to split {}", self.input.display()))?;
            progress.chunk_written(&path);
            formatter.format_path(&path)?;
        }
        progress.finish();
        formatter.finish()?;

        log::info!(
            "Wrote {} chunk files to {}",
            progress.chunks_written(),
            self.output.display()
        );
        Ok(())
    }

    /// Layer the command-line flags over the configured defaults
    pub fn split_options(&self, defaults: &SplitOptions) -> Result<SplitOptions> {
        let mut options = defaults.clone();
        if let Some(lines) = self.lines {
            options.lines_per_chunk = lines;
        }
        if self.header_from_input {
            options = options.header_from_input();
        }
        if let Some(header) = &self.header {
            options = options.header(header.as_str());
        }
        if let Some(format) = &self.index_format {
            options = options.index_format(format.parse::<IndexFormat>()?);
        }
        if let Some(label) = &self.encoding {
            options = options.encoding(TextEncoding::for_label(label)?);
        }
        Ok(options)
    }
}
