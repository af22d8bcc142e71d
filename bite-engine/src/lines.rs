//! Line-by-line reading with terminators preserved

use crate::encoding::TextEncoding;
use crate::error::{ChunkError, IoContext, Result};
use crate::input::{InputReader, SplitInput};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::Path;

/// Reads decoded lines, each keeping its `\n` or `\r\n` terminator
///
/// The underlying reader is closed when the `LineReader` is dropped.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    name: String,
    encoding: TextEncoding,
    buffer: Vec<u8>,
    lines_read: usize,
    finished: bool,
}

impl LineReader<BufReader<File>> {
    /// Open a file for reading
    pub fn open(path: &Path, encoding: TextEncoding) -> Result<Self> {
        let file = File::open(path).io_context(|| format!("opening {}", path.display()))?;
        Ok(Self::new(
            BufReader::new(file),
            path.display().to_string(),
            encoding,
        ))
    }
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader; `name` identifies it in error messages
    pub fn new(reader: R, name: impl Into<String>, encoding: TextEncoding) -> Self {
        Self {
            reader,
            name: name.into(),
            encoding,
            buffer: Vec::new(),
            lines_read: 0,
            finished: false,
        }
    }

    /// Name of the source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of lines returned so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Read the next line, `None` at end of input
    pub fn read_line(&mut self) -> Result<Option<String>> {
        if self.finished {
            return Ok(None);
        }

        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .io_context(|| format!("reading {}", self.name))?;
        if read == 0 {
            self.finished = true;
            return Ok(None);
        }

        self.lines_read += 1;
        let line = self
            .encoding
            .decode(&self.buffer)
            .map_err(|e| match e {
                ChunkError::Encoding { reason } => ChunkError::Encoding {
                    reason: format!("{reason} in {} line {}", self.name, self.lines_read),
                },
                other => other,
            })?;
        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(line) => line.map(Ok),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Lines of a [`SplitInput`], created by [`iterate_lines`]
pub struct InputLines {
    lines: LineReader<InputReader>,
    strip_end: bool,
}

impl InputLines {
    /// Number of lines returned so far
    pub fn lines_read(&self) -> usize {
        self.lines.lines_read()
    }
}

impl Iterator for InputLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        if self.strip_end {
            line.truncate(line.trim_end().len());
        }
        Some(Ok(line))
    }
}

impl FusedIterator for InputLines {}

impl std::fmt::Debug for InputLines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputLines")
            .field("name", &self.lines.name())
            .field("lines_read", &self.lines.lines_read())
            .field("strip_end", &self.strip_end)
            .finish_non_exhaustive()
    }
}

/// Iterate lazily over the lines of `input`
///
/// Lines keep their terminators unless `strip_end` is set, in which case
/// all trailing whitespace, terminator included, is removed. The input is
/// closed when the iterator is exhausted and dropped.
///
/// ```
/// use bite_engine::{iterate_lines, SplitInput, TextEncoding};
///
/// let lines: Vec<String> = iterate_lines(
///     SplitInput::from_text("test.txt", "a  \nb\n"),
///     TextEncoding::utf8(),
///     true,
/// )?
/// .collect::<Result<_, _>>()?;
/// assert_eq!(lines, vec!["a", "b"]);
/// # Ok::<(), bite_engine::ChunkError>(())
/// ```
pub fn iterate_lines(
    input: SplitInput,
    encoding: TextEncoding,
    strip_end: bool,
) -> Result<InputLines> {
    Ok(InputLines {
        lines: input.into_lines(encoding)?,
        strip_end,
    })
}

/// Append a `\n` to `line` unless it already ends with one
pub(crate) fn terminated(mut line: String) -> String {
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(
            Cursor::new(text.as_bytes().to_vec()),
            "memory",
            TextEncoding::utf8(),
        )
    }

    #[test]
    fn test_keeps_terminators() {
        let lines: Vec<String> = reader("Symbols\nAyp\r\nBx\nDt")
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["Symbols\n", "Ayp\r\n", "Bx\n", "Dt"]);
    }

    #[test]
    fn test_empty_input() {
        let mut lines = reader("");
        assert!(lines.read_line().unwrap().is_none());
        assert!(lines.next().is_none());
        assert_eq!(lines.lines_read(), 0);
    }

    #[test]
    fn test_blank_lines_are_lines() {
        let lines: Vec<String> = reader("\n\nx\n").collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["\n", "\n", "x\n"]);
    }

    #[test]
    fn test_decode_error_names_the_line() {
        let mut lines = LineReader::new(
            Cursor::new(b"fine\nbad\xff\nnever\n".to_vec()),
            "input.txt",
            TextEncoding::utf8(),
        );
        assert_eq!(lines.next().unwrap().unwrap(), "fine\n");

        let error = lines.next().unwrap().unwrap_err();
        assert!(error.to_string().contains("input.txt line 2"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_decodes_selected_encoding() {
        let mut lines = LineReader::new(
            Cursor::new(b"Caf\xe9\n".to_vec()),
            "latin1.txt",
            TextEncoding::for_label("latin1").unwrap(),
        );
        assert_eq!(lines.read_line().unwrap().unwrap(), "Café\n");
    }

    #[test]
    fn test_iterate_lines_keeps_line_ends() {
        let lines: Vec<String> = iterate_lines(
            SplitInput::from_text("test.txt", "Symbols\nAyp\nBx\nCC\nDt"),
            TextEncoding::utf8(),
            false,
        )
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
        assert_eq!(lines, vec!["Symbols\n", "Ayp\n", "Bx\n", "CC\n", "Dt"]);
    }

    #[test]
    fn test_iterate_lines_strips_line_ends() {
        let mut lines = iterate_lines(
            SplitInput::from_text("test.txt", "Symbols\nAyp\nBx\nCC\nDt"),
            TextEncoding::utf8(),
            true,
        )
        .unwrap();
        let first = lines.next().unwrap().unwrap();
        assert_eq!(first, "Symbols");
        assert_eq!(lines.lines_read(), 1);

        let rest: Vec<String> = lines.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(rest, vec!["Ayp", "Bx", "CC", "Dt"]);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_iterate_lines_strips_trailing_whitespace() {
        let lines: Vec<String> = iterate_lines(
            SplitInput::from_text("", "a \t\r\n\n  b  \n"),
            TextEncoding::utf8(),
            true,
        )
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
        assert_eq!(lines, vec!["a", "", "  b"]);
    }

    #[test]
    fn test_iterate_lines_of_missing_file() {
        let result = iterate_lines(
            SplitInput::from_file("definitely/absent/test.txt"),
            TextEncoding::utf8(),
            false,
        );
        assert!(matches!(result, Err(ChunkError::Io { .. })));
    }

    #[test]
    fn test_terminated() {
        assert_eq!(terminated("a".to_string()), "a\n");
        assert_eq!(terminated("a\n".to_string()), "a\n");
        assert_eq!(terminated("a\r\n".to_string()), "a\r\n");
    }
}
