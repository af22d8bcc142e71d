//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner counting the chunk files written by a split
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
    chunks: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
            chunks: 0,
        }
    }

    /// Start the spinner for splitting `input`
    pub fn init_split(&mut self, input: &Path) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {pos} chunk files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(format!("from {}", input.display()));
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a written chunk file
    pub fn chunk_written(&mut self, path: &Path) {
        self.chunks += 1;
        if let Some(pb) = &self.progress_bar {
            if let Some(name) = path.file_name() {
                pb.set_message(format!("wrote {}", name.to_string_lossy()));
            }
            pb.inc(1);
        }
    }

    /// Number of chunk files reported so far, counted even when quiet
    pub fn chunks_written(&self) -> u64 {
        self.chunks
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("complete");
        }
    }
}
