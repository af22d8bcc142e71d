//! Options for splitting and joining

use crate::encoding::TextEncoding;
use crate::error::{ChunkError, Result};
use crate::naming::IndexFormat;
use serde::{Deserialize, Serialize};

/// Lines per chunk file when nothing else is configured
pub const DEFAULT_LINES_PER_CHUNK: usize = 1000;

/// Header written at the top of every chunk file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitHeader {
    /// Chunk files hold data lines only
    #[default]
    None,
    /// The first input line is repeated in every chunk file
    FromSource,
    /// An explicit header line
    Fixed(String),
}

impl SplitHeader {
    /// Whether chunk files written with this header start with a header line
    pub fn is_persisted(&self) -> bool {
        !matches!(self, SplitHeader::None)
    }
}

/// Reject an explicit header that would span more than one line
///
/// A single trailing `\n` or `\r\n` is allowed.
pub(crate) fn validate_header_line(header: &str) -> Result<()> {
    let line = header
        .strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(header);
    if line.contains(['\n', '\r']) {
        return Err(ChunkError::invalid_argument(format!(
            "header must be a single line: {header:?}"
        )));
    }
    Ok(())
}

/// Options for [`split_by_lines`](crate::split_by_lines)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Data lines per chunk file (the header is not counted)
    pub lines_per_chunk: usize,
    /// Encoding of the input and of the written chunk files
    pub encoding: TextEncoding,
    /// Header written at the start of every chunk file
    pub header: SplitHeader,
    /// Format of the chunk index in file names
    pub index_format: IndexFormat,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self::new(DEFAULT_LINES_PER_CHUNK)
    }
}

impl SplitOptions {
    /// Options for chunks of `lines_per_chunk` lines without a header
    pub fn new(lines_per_chunk: usize) -> Self {
        Self {
            lines_per_chunk,
            encoding: TextEncoding::default(),
            header: SplitHeader::None,
            index_format: IndexFormat::default(),
        }
    }

    /// Repeat the first input line at the top of every chunk file
    pub fn header_from_input(mut self) -> Self {
        self.header = SplitHeader::FromSource;
        self
    }

    /// Write `header` at the top of every chunk file
    ///
    /// A header spanning several lines is rejected when splitting starts.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = SplitHeader::Fixed(header.into());
        self
    }

    /// Set the text encoding
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the chunk index format
    pub fn index_format(mut self, format: IndexFormat) -> Self {
        self.index_format = format;
        self
    }
}

/// Options for [`join_chunks`](crate::join_chunks)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinOptions {
    /// Encoding of the chunk files
    pub encoding: TextEncoding,
    /// Whether every chunk file starts with a repeated header line
    pub persisted_header: bool,
    /// Header to emit instead of the one read from the first chunk
    pub header: Option<String>,
    /// Keep going when a chunk index is missing
    pub ignore_missing_chunks: bool,
}

impl JoinOptions {
    /// Chunk files start with a header line
    pub fn persisted_header(mut self) -> Self {
        self.persisted_header = true;
        self
    }

    /// Chunk files start with a header line; emit `header` in its place
    ///
    /// A header spanning several lines is rejected when joining starts.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.persisted_header = true;
        self.header = Some(header.into());
        self
    }

    /// Tolerate gaps in the chunk indices
    pub fn ignore_missing_chunks(mut self) -> Self {
        self.ignore_missing_chunks = true;
        self
    }

    /// Set the text encoding
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}
