//! Error types for chunking, splitting and joining

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum ChunkError {
    /// An argument is outside the accepted domain
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected
        reason: String,
    },

    /// A file name does not carry a recognizable chunk index
    #[error("malformed chunk file name: {name}")]
    MalformedChunkName {
        /// The offending file name
        name: String,
    },

    /// The next chunk file does not have the expected index
    #[error("chunk {expected} not found (next file {} has index {found})", .path.display())]
    MissingChunk {
        /// The index the joiner was waiting for
        expected: usize,
        /// The index parsed from the file that came instead
        found: usize,
        /// The file that came instead
        path: PathBuf,
    },

    /// Underlying read/write/open failure
    #[error("I/O error ({context}): {source}")]
    Io {
        /// What was being done when the failure happened
        context: String,
        /// The underlying error
        #[source]
        source: io::Error,
    },

    /// Text could not be decoded or encoded with the selected encoding
    #[error("encoding error: {reason}")]
    Encoding {
        /// Description of the offending text
        reason: String,
    },
}

impl ChunkError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        ChunkError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Attaches a description to I/O results, turning them into [`ChunkError::Io`]
pub(crate) trait IoContext<T> {
    fn io_context<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| ChunkError::Io {
            context: context().into(),
            source,
        })
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ChunkError>;
