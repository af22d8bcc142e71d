//! Lazy chunking of arbitrary sequences
//!
//! [`ChunkBy`] pulls its source one element at a time and materializes a
//! single chunk per call to `next`. A header, when present, is cloned as
//! the first element of every chunk and does not count towards the chunk
//! size.

use crate::error::{ChunkError, Result};
use std::iter::FusedIterator;

/// Upper bound for the capacity reserved up front for a chunk
const MAX_PREALLOCATED: usize = 4096;

/// How a header is attached to every chunk
///
/// `T` is the source element type and `U` the mapped chunk element type.
/// A header taken from the source skips the element mapping and goes
/// through its own conversion instead.
pub enum HeaderMode<T, U> {
    /// Chunks carry data elements only
    None,
    /// The first element of the source, converted, becomes the header
    FromSource(fn(T) -> U),
    /// An explicit header value
    Fixed(U),
}

impl<T, U> Default for HeaderMode<T, U> {
    fn default() -> Self {
        HeaderMode::None
    }
}

impl<T, U> HeaderMode<T, U> {
    /// Whether chunks produced with this mode start with a header
    pub fn is_persisted(&self) -> bool {
        !matches!(self, HeaderMode::None)
    }
}

impl<T: Into<U>, U> HeaderMode<T, U> {
    /// Take the first source element as the header, converted with `Into`
    pub fn from_source() -> Self {
        HeaderMode::FromSource(Into::into)
    }
}

impl<T, U: std::fmt::Debug> std::fmt::Debug for HeaderMode<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderMode::None => f.write_str("None"),
            HeaderMode::FromSource(_) => f.write_str("FromSource"),
            HeaderMode::Fixed(header) => f.debug_tuple("Fixed").field(header).finish(),
        }
    }
}

/// Iterator over bounded-size chunks of a source sequence
///
/// Created by [`chunk_by`], [`chunks_of`], [`ChunkBy::new`] or
/// [`ChunkBy::with_source_header`]. Every chunk except possibly the last
/// holds exactly `chunk_size` data elements; the last holds at least one.
pub struct ChunkBy<I, F, U> {
    source: I,
    map: F,
    chunk_size: usize,
    header: Option<U>,
    exhausted: bool,
}

fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(ChunkError::invalid_argument(
            "chunk size must be a positive integer",
        ));
    }
    Ok(())
}

impl<I, F, U> ChunkBy<I, F, U>
where
    I: Iterator,
    F: FnMut(I::Item) -> U,
{
    /// Chunk `source`, mapping every data element with `map` and prefixing
    /// each chunk with `header` when one is given
    pub fn new<S>(source: S, chunk_size: usize, map: F, header: Option<U>) -> Result<Self>
    where
        S: IntoIterator<IntoIter = I>,
    {
        validate_chunk_size(chunk_size)?;
        Ok(Self {
            source: source.into_iter(),
            map,
            chunk_size,
            header,
            exhausted: false,
        })
    }

    /// Chunk `source`, taking its first element as the header
    ///
    /// The header is consumed immediately and converted with `to_header`
    /// instead of `map`; only the remaining elements go through `map`. An
    /// empty source yields no chunks.
    pub fn with_source_header<S, H>(
        source: S,
        chunk_size: usize,
        map: F,
        to_header: H,
    ) -> Result<Self>
    where
        S: IntoIterator<IntoIter = I>,
        H: FnOnce(I::Item) -> U,
    {
        validate_chunk_size(chunk_size)?;
        let mut source = source.into_iter();
        let header = source.next().map(to_header);
        let exhausted = header.is_none();

        Ok(Self {
            source,
            map,
            chunk_size,
            header,
            exhausted,
        })
    }

    /// The header prefixed to every chunk, if any
    pub fn header(&self) -> Option<&U> {
        self.header.as_ref()
    }

    /// Maximum number of data elements per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Reference to the underlying source
    pub fn get_ref(&self) -> &I {
        &self.source
    }

    /// Mutable reference to the underlying source
    ///
    /// Pulling elements through this reference bypasses the chunking.
    pub fn get_mut(&mut self) -> &mut I {
        &mut self.source
    }
}

impl<I, F, U> Iterator for ChunkBy<I, F, U>
where
    I: Iterator,
    F: FnMut(I::Item) -> U,
    U: Clone,
{
    type Item = Vec<U>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let offset = usize::from(self.header.is_some());
        let mut chunk = Vec::with_capacity(self.chunk_size.min(MAX_PREALLOCATED) + offset);
        if let Some(header) = &self.header {
            chunk.push(header.clone());
        }

        while chunk.len() - offset < self.chunk_size {
            match self.source.next() {
                Some(item) => chunk.push((self.map)(item)),
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        // A header alone is not a chunk
        if chunk.len() == offset {
            None
        } else {
            Some(chunk)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let (lower, upper) = self.source.size_hint();
        (
            lower.div_ceil(self.chunk_size),
            upper.map(|upper| upper.div_ceil(self.chunk_size)),
        )
    }
}

impl<I, F, U> FusedIterator for ChunkBy<I, F, U>
where
    I: Iterator,
    F: FnMut(I::Item) -> U,
    U: Clone,
{
}

impl<I, F, U: std::fmt::Debug> std::fmt::Debug for ChunkBy<I, F, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkBy")
            .field("chunk_size", &self.chunk_size)
            .field("header", &self.header)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

/// Split `source` into lazily produced chunks of up to `chunk_size` elements
///
/// `map` is applied to every data element. With [`HeaderMode::FromSource`]
/// the first element becomes the header of every chunk through the mode's
/// own conversion, so it is never passed to `map`.
///
/// ```
/// use bite_engine::{chunk_by, HeaderMode};
///
/// let chunks: Vec<_> = chunk_by(vec![1, 2, 3, 4, 5], 2, |x| x * 2, HeaderMode::None)
///     .unwrap()
///     .collect();
/// assert_eq!(chunks, vec![vec![2, 4], vec![6, 8], vec![10]]);
/// ```
pub fn chunk_by<S, F, U>(
    source: S,
    chunk_size: usize,
    map: F,
    header: HeaderMode<S::Item, U>,
) -> Result<ChunkBy<S::IntoIter, F, U>>
where
    S: IntoIterator,
    F: FnMut(S::Item) -> U,
{
    match header {
        HeaderMode::None => ChunkBy::new(source, chunk_size, map, None),
        HeaderMode::Fixed(header) => ChunkBy::new(source, chunk_size, map, Some(header)),
        HeaderMode::FromSource(to_header) => {
            ChunkBy::with_source_header(source, chunk_size, map, to_header)
        }
    }
}

/// Unmapped, headerless chunking
#[allow(clippy::type_complexity)]
pub fn chunks_of<S>(
    source: S,
    chunk_size: usize,
) -> Result<ChunkBy<S::IntoIter, fn(S::Item) -> S::Item, S::Item>>
where
    S: IntoIterator,
{
    ChunkBy::new(
        source,
        chunk_size,
        std::convert::identity as fn(S::Item) -> S::Item,
        None,
    )
}
