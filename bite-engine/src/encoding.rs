//! Text encoding selection
//!
//! Lines are delimited on the `\n` byte before decoding, so only
//! ASCII-compatible encodings are accepted.

use crate::error::{ChunkError, Result};
use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// An ASCII-compatible text encoding, UTF-8 by default
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextEncoding(&'static Encoding);

impl Default for TextEncoding {
    fn default() -> Self {
        Self(UTF_8)
    }
}

impl TextEncoding {
    /// UTF-8
    pub fn utf8() -> Self {
        Self::default()
    }

    /// Resolve a WHATWG encoding label such as `utf-8`, `latin1` or
    /// `shift_jis`
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            ChunkError::invalid_argument(format!("unknown encoding: {label}"))
        })?;
        if !encoding.is_ascii_compatible() {
            return Err(ChunkError::invalid_argument(format!(
                "encoding {} is not supported for line-based splitting",
                encoding.name()
            )));
        }
        Ok(Self(encoding))
    }

    /// Canonical name of the encoding
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decode one raw line, rejecting malformed byte sequences
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        self.0
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned)
            .ok_or_else(|| ChunkError::Encoding {
                reason: format!("malformed {} byte sequence", self.name()),
            })
    }

    /// Encode text, rejecting characters the encoding cannot represent
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        let (bytes, _, unmappable) = self.0.encode(text);
        if unmappable {
            return Err(ChunkError::Encoding {
                reason: format!("text is not representable in {}", self.name()),
            });
        }
        Ok(bytes)
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = ChunkError;

    fn try_from(label: String) -> Result<Self> {
        Self::for_label(&label)
    }
}

impl From<TextEncoding> for String {
    fn from(encoding: TextEncoding) -> Self {
        encoding.name().to_string()
    }
}
