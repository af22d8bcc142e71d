//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Plain text formatter - outputs one path per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_path(&mut self, path: &Path) -> Result<()> {
        writeln!(self.writer, "{}", path.display())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
