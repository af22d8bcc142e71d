//! Joining chunk files back into one line stream

use crate::config::{validate_header_line, JoinOptions};
use crate::error::{ChunkError, IoContext, Result};
use crate::lines::{terminated, LineReader};
use crate::naming::{ChunkNaming, IndexFormat};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The chunk files to join
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkSource {
    /// Directory holding the chunk files of a single split
    Directory(PathBuf),
    /// Explicit list of chunk files, already in order
    Files(Vec<PathBuf>),
}

impl ChunkSource {
    /// `Directory` if `path` is a directory, otherwise a single file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            ChunkSource::Directory(path)
        } else {
            ChunkSource::Files(vec![path])
        }
    }

    /// Resolve to the ordered list of chunk files
    pub fn resolve(self, naming: &ChunkNaming) -> Result<Vec<PathBuf>> {
        match self {
            ChunkSource::Directory(dir) => scan_directory(&dir, naming),
            ChunkSource::Files(files) => Ok(files),
        }
    }
}

impl From<Vec<PathBuf>> for ChunkSource {
    fn from(files: Vec<PathBuf>) -> Self {
        ChunkSource::Files(files)
    }
}

/// Chunk files in `dir`, sorted by file name
///
/// Only regular files whose names carry a chunk marker are returned. With
/// fixed-width zero-padded indices, name order is index order.
pub fn scan_chunk_directory(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let naming = ChunkNaming::new(IndexFormat::default())?;
    scan_directory(dir.as_ref(), &naming)
}

fn scan_directory(dir: &Path, naming: &ChunkNaming) -> Result<Vec<PathBuf>> {
    let context = || format!("listing {}", dir.display());

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).io_context(context)? {
        let path = entry.io_context(context)?.path();
        let is_chunk = path
            .file_name()
            .is_some_and(|name| naming.is_chunk_file(&name.to_string_lossy()));
        if is_chunk && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(dir = %dir.display(), files = files.len(), "found chunk files");
    Ok(files)
}

/// The chunk file being read
#[derive(Debug)]
struct OpenChunk {
    lines: LineReader<BufReader<File>>,
    path: PathBuf,
    /// Whether the last line read ended with `\n`; `None` before any line
    ends_terminated: Option<bool>,
}

impl OpenChunk {
    fn read_line(&mut self) -> Result<Option<String>> {
        let line = self.lines.read_line()?;
        if let Some(line) = &line {
            self.ends_terminated = Some(line.ends_with('\n'));
        }
        Ok(line)
    }
}

/// Lazy, forward-only stream of the lines of a chunk file set
///
/// Created by [`join_chunks`]. Files are opened one at a time, when the
/// stream reaches them, and closed as soon as their lines are exhausted.
/// After the first error the stream is fused.
#[derive(Debug)]
pub struct JoinChunks {
    files: std::vec::IntoIter<PathBuf>,
    naming: ChunkNaming,
    options: JoinOptions,
    current: Option<OpenChunk>,
    expected_index: usize,
    needs_break: bool,
    failed: bool,
}

impl JoinChunks {
    /// Join `files` in the given order
    pub fn new(files: Vec<PathBuf>, options: JoinOptions) -> Result<Self> {
        let naming = ChunkNaming::new(IndexFormat::default())?;
        Self::with_naming(files, options, naming)
    }

    fn with_naming(
        files: Vec<PathBuf>,
        options: JoinOptions,
        naming: ChunkNaming,
    ) -> Result<Self> {
        if let Some(header) = &options.header {
            validate_header_line(header)?;
        }
        Ok(Self {
            files: files.into_iter(),
            naming,
            options,
            current: None,
            expected_index: 0,
            needs_break: false,
            failed: false,
        })
    }

    /// Number of chunk files opened so far
    pub fn files_opened(&self) -> usize {
        self.expected_index
    }

    /// Drain the stream into one string
    pub fn read_to_string(self) -> Result<String> {
        self.collect()
    }

    /// Drain the stream into `writer`, encoded with the join encoding
    ///
    /// Returns the number of lines written.
    pub fn write_to<W: Write>(self, writer: &mut W) -> Result<usize> {
        let encoding = self.options.encoding;
        let mut count = 0;
        for line in self {
            writer
                .write_all(&encoding.encode(&line?)?)
                .io_context(|| "writing joined output")?;
            count += 1;
        }
        writer.flush().io_context(|| "writing joined output")?;
        Ok(count)
    }

    /// Open the next file, checking its index and handling its header line
    ///
    /// Returns the header to emit, which only the first file produces.
    fn open(&mut self, path: PathBuf) -> Result<Option<String>> {
        let index = self.naming.chunk_index_of(&path)?;
        if index != self.expected_index {
            if !self.options.ignore_missing_chunks {
                return Err(ChunkError::MissingChunk {
                    expected: self.expected_index,
                    found: index,
                    path,
                });
            }
            warn!(
                expected = self.expected_index,
                found = index,
                path = %path.display(),
                "chunk index out of sequence, continuing"
            );
        }

        let first = self.expected_index == 0;
        let lines = LineReader::open(&path, self.options.encoding)?;
        // Advances per opened file, not to the parsed index
        self.expected_index += 1;
        debug!(path = %path.display(), index, "joining chunk file");
        let chunk = self.current.insert(OpenChunk {
            lines,
            path,
            ends_terminated: None,
        });

        if !self.options.persisted_header {
            return Ok(None);
        }
        let own_header = chunk.read_line()?;
        if !first {
            return Ok(None);
        }
        Ok(match &self.options.header {
            Some(header) => Some(terminated(header.clone())),
            None => own_header,
        })
    }

    fn next_line(&mut self) -> Option<Result<String>> {
        loop {
            if self.current.is_none() {
                let path = self.files.next()?;
                match self.open(path) {
                    Ok(Some(header)) => return Some(Ok(header)),
                    Ok(None) => continue,
                    Err(e) => return Some(Err(e)),
                }
            }
            let Some(chunk) = self.current.as_mut() else {
                continue;
            };

            match chunk.read_line() {
                Ok(Some(line)) => {
                    if self.needs_break {
                        self.needs_break = false;
                        return Some(Ok(format!("\n{line}")));
                    }
                    return Some(Ok(line));
                }
                Ok(None) => {
                    if let Some(terminated) = chunk.ends_terminated {
                        self.needs_break = !terminated;
                    }
                    debug!(path = %chunk.path.display(), "finished chunk file");
                    self.current = None;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl Iterator for JoinChunks {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_line();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
            self.current = None;
        }
        item
    }
}

impl FusedIterator for JoinChunks {}

/// Join a chunk file set into one lazy stream of lines
///
/// A directory is scanned for chunk files, sorted by name. Files are read
/// in order while an expected index counts up from 0; a file whose index
/// differs fails with [`ChunkError::MissingChunk`] unless
/// `ignore_missing_chunks` is set. With `persisted_header`, the first line
/// of every file is a header: it is emitted once (or replaced by
/// `options.header`) for the first file and dropped for the others.
///
/// ```no_run
/// use bite_engine::{join_chunks, ChunkSource, JoinOptions};
///
/// let joined: String = join_chunks(
///     ChunkSource::Directory("out".into()),
///     &JoinOptions::default().persisted_header(),
/// )?
/// .collect::<Result<_, _>>()?;
/// # Ok::<(), bite_engine::ChunkError>(())
/// ```
pub fn join_chunks(source: ChunkSource, options: &JoinOptions) -> Result<JoinChunks> {
    let naming = ChunkNaming::new(IndexFormat::default())?;
    let files = source.resolve(&naming)?;
    JoinChunks::with_naming(files, options.clone(), naming)
}
