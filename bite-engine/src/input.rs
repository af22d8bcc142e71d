//! Input abstraction for splitting
//!
//! A split reads either a file on disk or an already open stream. Both are
//! resolved once into a [`LineReader`] plus the file name used to derive
//! chunk file names.

use crate::encoding::TextEncoding;
use crate::error::{ChunkError, IoContext, Result};
use crate::lines::LineReader;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Boxed reader behind a resolved input
pub type InputReader = Box<dyn BufRead + Send>;

/// Source of the lines to split
pub enum SplitInput {
    /// File path to read from
    File(PathBuf),
    /// Open stream; `name` stands in for the file name
    Reader {
        /// File name used for `<base>` and `<ext>` of the chunk files
        name: String,
        /// The stream itself
        reader: InputReader,
    },
}

impl std::fmt::Debug for SplitInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitInput::File(path) => f.debug_tuple("File").field(path).finish(),
            SplitInput::Reader { name, .. } => f
                .debug_struct("Reader")
                .field("name", name)
                .field("reader", &"<Reader>")
                .finish(),
        }
    }
}

impl SplitInput {
    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        SplitInput::File(path.into())
    }

    /// Create input from an open stream named `name`
    pub fn from_reader<R: Read + Send + 'static>(name: impl Into<String>, reader: R) -> Self {
        SplitInput::Reader {
            name: name.into(),
            reader: Box::new(BufReader::new(reader)),
        }
    }

    /// Create input from in-memory text named `name`
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        SplitInput::Reader {
            name: name.into(),
            reader: Box::new(Cursor::new(text.into().into_bytes())),
        }
    }

    /// File name the chunk names are derived from, if one is available
    pub fn file_name(&self) -> Option<String> {
        match self {
            SplitInput::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            SplitInput::Reader { name, .. } => Path::new(name)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        }
    }

    /// Resolve into a line reader and the file name for chunk naming
    pub(crate) fn open(self, encoding: TextEncoding) -> Result<(LineReader<InputReader>, String)> {
        let file_name = self.file_name().ok_or_else(|| {
            ChunkError::invalid_argument(format!("{self:?} has no file name to derive chunk names"))
        })?;

        Ok((self.into_lines(encoding)?, file_name))
    }

    /// Resolve into a line reader, with no file name required
    pub(crate) fn into_lines(self, encoding: TextEncoding) -> Result<LineReader<InputReader>> {
        Ok(match self {
            SplitInput::File(path) => {
                let file =
                    File::open(&path).io_context(|| format!("opening {}", path.display()))?;
                let reader: InputReader = Box::new(BufReader::new(file));
                LineReader::new(reader, path.display().to_string(), encoding)
            }
            SplitInput::Reader { name, reader } => LineReader::new(reader, name, encoding),
        })
    }
}

impl From<PathBuf> for SplitInput {
    fn from(path: PathBuf) -> Self {
        SplitInput::File(path)
    }
}

impl From<&Path> for SplitInput {
    fn from(path: &Path) -> Self {
        SplitInput::File(path.to_path_buf())
    }
}
