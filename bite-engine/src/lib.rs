//! Lazy chunked iteration and line-based splitting of text files
//!
//! The crate has three parts:
//!
//! - [`chunk_by`] and [`ChunkBy`] cut any iterator into bounded-size chunks,
//!   optionally mapping every element and repeating a header at the start
//!   of each chunk.
//! - [`iterate_lines`] reads the lines of a file or stream lazily.
//! - [`split_by_lines`] writes the lines of a text file into numbered chunk
//!   files (`<base>.chunk<index><ext>`), and [`join_chunks`] streams such a
//!   set of files back as one sequence of lines.
//!
//! All of them are lazy: the source is pulled only as far as the consumer
//! asks, and at most one chunk (or one chunk file) is held at a time.
//!
//! ```
//! use bite_engine::{chunk_by, HeaderMode};
//!
//! let rows = vec!["name", "ada", "grace", "edsger"];
//! let chunks: Vec<_> = chunk_by(rows, 2, |row| row, HeaderMode::from_source())
//!     .unwrap()
//!     .collect();
//! assert_eq!(chunks, vec![vec!["name", "ada", "grace"], vec!["name", "edsger"]]);
//! ```

#![warn(missing_docs)]

pub mod chunker;
pub mod config;
pub mod encoding;
pub mod error;
pub mod input;
pub mod join;
pub mod lines;
pub mod naming;
pub mod split;

// Re-export key types
pub use chunker::{chunk_by, chunks_of, ChunkBy, HeaderMode};
pub use config::{JoinOptions, SplitHeader, SplitOptions, DEFAULT_LINES_PER_CHUNK};
pub use encoding::TextEncoding;
pub use error::{ChunkError, Result};
pub use input::{InputReader, SplitInput};
pub use join::{join_chunks, scan_chunk_directory, ChunkSource, JoinChunks};
pub use lines::{iterate_lines, InputLines, LineReader};
pub use naming::{split_file_name, ChunkNaming, IndexFormat};
pub use split::{split_by_lines, ChunkFileWriter};
