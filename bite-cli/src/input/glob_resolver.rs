//! Chunk file pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Resolve file patterns to existing files, sorted and de-duplicated
///
/// Sorting by path puts zero-padded chunk files in index order.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::NoMatchingFiles(patterns.to_vec()).into());
    }

    files.sort();
    files.dedup();
    log::debug!("resolved {} chunk files from {:?}", files.len(), patterns);

    Ok(files)
}
