//! Splitting a text file into numbered chunk files

use crate::chunker::ChunkBy;
use crate::config::{validate_header_line, SplitHeader, SplitOptions};
use crate::encoding::TextEncoding;
use crate::error::{ChunkError, IoContext, Result};
use crate::input::{InputReader, SplitInput};
use crate::lines::{terminated, LineReader};
use crate::naming::{split_file_name, ChunkNaming};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Yields decoded lines and parks the first read error instead of
/// yielding it, so the lines can feed the chunker directly
struct LinesUntilError {
    lines: LineReader<InputReader>,
    error: Option<ChunkError>,
}

impl Iterator for LinesUntilError {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        match self.lines.read_line() {
            Ok(line) => line,
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

type LineChunks = ChunkBy<LinesUntilError, fn(String) -> String, String>;

/// Writes one chunk file per call to `next`
///
/// The lazy form of [`split_by_lines`]. Each item is the path of the chunk
/// file just written, in index order starting at 0. The input is closed
/// when the writer is dropped; after an error the writer is fused.
pub struct ChunkFileWriter {
    chunks: LineChunks,
    naming: ChunkNaming,
    output_directory: PathBuf,
    base: String,
    ext: String,
    encoding: TextEncoding,
    next_index: usize,
    failed: bool,
}

impl std::fmt::Debug for ChunkFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkFileWriter")
            .field("output_directory", &self.output_directory)
            .field("base", &self.base)
            .field("ext", &self.ext)
            .field("next_index", &self.next_index)
            .finish_non_exhaustive()
    }
}

impl ChunkFileWriter {
    /// Prepare a split of `input` into `output_directory`
    ///
    /// Opens the input, reads the header line if it comes from the input
    /// and creates the output directory. No chunk file is written yet.
    pub fn new(
        input: SplitInput,
        output_directory: impl AsRef<Path>,
        options: &SplitOptions,
    ) -> Result<Self> {
        if options.lines_per_chunk == 0 {
            return Err(ChunkError::invalid_argument(
                "lines per chunk must be a positive integer",
            ));
        }
        if let SplitHeader::Fixed(header) = &options.header {
            validate_header_line(header)?;
        }
        let naming = ChunkNaming::new(options.index_format)?;

        let (mut lines, file_name) = input.open(options.encoding)?;
        let (base, ext) = split_file_name(&file_name);

        let header = match &options.header {
            SplitHeader::None => None,
            SplitHeader::Fixed(header) => Some(terminated(header.clone())),
            SplitHeader::FromSource => lines.read_line()?,
        };

        let output_directory = output_directory.as_ref().to_path_buf();
        fs::create_dir_all(&output_directory)
            .io_context(|| format!("creating {}", output_directory.display()))?;

        let source = LinesUntilError { lines, error: None };
        let chunks = ChunkBy::new(
            source,
            options.lines_per_chunk,
            std::convert::identity as fn(String) -> String,
            header,
        )?;

        debug!(
            input = %file_name,
            output = %output_directory.display(),
            lines_per_chunk = options.lines_per_chunk,
            header = chunks.header().is_some(),
            "splitting by lines"
        );

        Ok(Self {
            chunks,
            naming,
            output_directory,
            base,
            ext,
            encoding: options.encoding,
            next_index: 0,
            failed: false,
        })
    }

    /// The header repeated in every chunk file, if any
    pub fn header(&self) -> Option<&str> {
        self.chunks.header().map(String::as_str)
    }

    /// Number of chunk files written so far
    pub fn chunks_written(&self) -> usize {
        self.next_index
    }

    fn write_next(&mut self) -> Option<Result<PathBuf>> {
        let chunk = self.chunks.next();

        // A read error ends the source early; never write the partial chunk
        if let Some(error) = self.chunks.get_mut().error.take() {
            return Some(Err(error));
        }
        let chunk = chunk?;

        let name = self.naming.file_name(&self.base, self.next_index, &self.ext);
        let path = self.output_directory.join(name);
        if let Err(e) = write_chunk(&path, &chunk, self.encoding) {
            return Some(Err(e));
        }

        debug!(path = %path.display(), lines = chunk.len(), "wrote chunk file");
        self.next_index += 1;
        Some(Ok(path))
    }
}

impl Iterator for ChunkFileWriter {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.write_next();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

impl FusedIterator for ChunkFileWriter {}

fn write_chunk(path: &Path, chunk: &[String], encoding: TextEncoding) -> Result<()> {
    let file = File::create(path).io_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in chunk {
        writer
            .write_all(&encoding.encode(line)?)
            .io_context(|| format!("writing {}", path.display()))?;
    }
    writer
        .flush()
        .io_context(|| format!("writing {}", path.display()))
}

/// Split `input` into chunk files of `options.lines_per_chunk` lines
///
/// Files are named `<base>.chunk<index><ext>` after the input's file name
/// and written into `output_directory`, which is created if missing.
/// Existing files with the same names are overwritten. Returns the written
/// paths in index order.
///
/// ```no_run
/// use bite_engine::{split_by_lines, SplitInput, SplitOptions};
///
/// let files = split_by_lines(
///     SplitInput::from_file("people.csv"),
///     "out",
///     &SplitOptions::new(1000).header_from_input(),
/// )?;
/// println!("wrote {} chunk files", files.len());
/// # Ok::<(), bite_engine::ChunkError>(())
/// ```
pub fn split_by_lines(
    input: SplitInput,
    output_directory: impl AsRef<Path>,
    options: &SplitOptions,
) -> Result<Vec<PathBuf>> {
    ChunkFileWriter::new(input, output_directory, options)?.collect()
}
