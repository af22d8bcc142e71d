//! Output formatting module
//!
//! `bite split` lists the chunk files it wrote, either one path per line
//! or as a JSON array.

use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the path of one written chunk file
    fn format_path(&mut self, path: &Path) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One path per line
    Text,
    /// JSON array of paths
    Json,
}

impl OutputFormat {
    /// Formatter for this format writing to `writer`
    pub fn formatter<'a, W: Write + Send + Sync + 'a>(
        self,
        writer: W,
    ) -> Box<dyn OutputFormatter + 'a> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        }
    }
}
