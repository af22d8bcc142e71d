//! Chunk file naming: `<base>.chunk<index><ext>`

use crate::error::{ChunkError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Marker between the base name and the chunk index
const CHUNK_MARKER: &str = ".chunk";

/// Matches the marker and index; the character after the digits is
/// checked separately so consecutive markers do not swallow each other.
const CHUNK_PATTERN: &str = r"\.chunk([0-9]+)";

/// Numeric format of the chunk index inside a file name
///
/// Parsed from a numeric format string: `d` (no padding), `<width>d`
/// (space padded) or `0<width>d` (zero padded). Only zero padding keeps
/// name order equal to index order and names recognizable when joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndexFormat {
    width: usize,
    zero_pad: bool,
}

impl Default for IndexFormat {
    fn default() -> Self {
        Self::zero_padded(4)
    }
}

impl IndexFormat {
    /// Fixed-width, zero padded decimal index
    pub fn zero_padded(width: usize) -> Self {
        Self {
            width,
            zero_pad: true,
        }
    }

    /// Plain decimal index
    pub fn unpadded() -> Self {
        Self {
            width: 0,
            zero_pad: false,
        }
    }

    /// Minimum number of characters of a rendered index
    pub fn width(&self) -> usize {
        self.width
    }

    /// Render `index`
    pub fn format(&self, index: usize) -> String {
        let width = self.width;
        if self.zero_pad {
            format!("{index:0width$}")
        } else {
            format!("{index:>width$}")
        }
    }
}

impl FromStr for IndexFormat {
    type Err = ChunkError;

    fn from_str(spec: &str) -> Result<Self> {
        let invalid = || {
            ChunkError::invalid_argument(format!(
                "unsupported chunk index format '{spec}' (expected e.g. '04d' or 'd')"
            ))
        };

        let body = spec.strip_suffix('d').ok_or_else(invalid)?;
        let (zero_pad, digits) = match body.strip_prefix('0') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let width = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| invalid())?
        };

        Ok(Self { width, zero_pad })
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.zero_pad, self.width) {
            (_, 0) => write!(f, "d"),
            (true, width) => write!(f, "0{width}d"),
            (false, width) => write!(f, "{width}d"),
        }
    }
}

impl TryFrom<String> for IndexFormat {
    type Error = ChunkError;

    fn try_from(spec: String) -> Result<Self> {
        spec.parse()
    }
}

impl From<IndexFormat> for String {
    fn from(format: IndexFormat) -> Self {
        format.to_string()
    }
}

/// Builds and recognizes chunk file names
#[derive(Debug, Clone)]
pub struct ChunkNaming {
    format: IndexFormat,
    pattern: Regex,
}

impl ChunkNaming {
    /// Create a naming scheme rendering indices with `format`
    pub fn new(format: IndexFormat) -> Result<Self> {
        let pattern = Regex::new(CHUNK_PATTERN)
            .map_err(|e| ChunkError::invalid_argument(format!("chunk name pattern: {e}")))?;
        Ok(Self { format, pattern })
    }

    /// The index format in use
    pub fn format(&self) -> IndexFormat {
        self.format
    }

    /// `<base>.chunk<index><ext>`, `ext` including its leading dot
    pub fn file_name(&self, base: &str, index: usize, ext: &str) -> String {
        format!("{base}{CHUNK_MARKER}{}{ext}", self.format.format(index))
    }

    /// Whether `name` carries a chunk marker followed by `.` or the end
    pub fn is_chunk_file(&self, name: &str) -> bool {
        self.last_index_digits(name).is_some()
    }

    /// Extract the chunk index from a file name, using the last marker
    pub fn chunk_index(&self, name: &str) -> Result<usize> {
        let malformed = || ChunkError::MalformedChunkName {
            name: name.to_string(),
        };
        self.last_index_digits(name)
            .ok_or_else(malformed)?
            .parse()
            .map_err(|_| malformed())
    }

    /// Same as [`ChunkNaming::chunk_index`] for the file name of `path`
    pub fn chunk_index_of(&self, path: &Path) -> Result<usize> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .ok_or_else(|| ChunkError::MalformedChunkName {
                name: path.display().to_string(),
            })?;
        self.chunk_index(&name)
    }

    fn last_index_digits<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.pattern
            .captures_iter(name)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let rest = &name[whole.end()..];
                if rest.is_empty() || rest.starts_with('.') {
                    captures.get(1).map(|digits| digits.as_str())
                } else {
                    None
                }
            })
            .last()
    }
}

/// Base name and extension (with its dot, or empty) of a file name
///
/// `data.tar.gz` gives `("data.tar", ".gz")`; `.profile` gives
/// `(".profile", "")`.
pub fn split_file_name(name: &str) -> (String, String) {
    let path = Path::new(name);
    let base = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    (base, ext)
}
