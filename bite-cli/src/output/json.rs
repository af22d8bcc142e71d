//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// JSON formatter - outputs the chunk file paths as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    paths: Vec<String>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            paths: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_path(&mut self, path: &Path) -> Result<()> {
        self.paths.push(path.display().to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.paths)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
