use std::fmt::Display;

use bstr::BStr;
use thiserror::Error;

/// Longest excerpt of offending input quoted in an error message.
const SNIPPET_LIMIT: usize = 64;

/// Everything that can go wrong while encoding or decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed syntax, a token that does not fit the destination kind, an
    /// empty document, or a missing target.
    #[error("invalid json: {0}")]
    InvalidJson(String),
    /// A value or field whose kind the codec cannot walk, or an accessor used
    /// against the wrong kind of descriptor.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    /// Reserved for cycle detection. No code path raises it yet.
    #[error("circular reference: {0}")]
    CircularReference(String),
    /// Nesting went deeper than [`CodecOptions::max_depth`].
    ///
    /// [`CodecOptions::max_depth`]: crate::CodecOptions::max_depth
    #[error("nesting depth exceeds limit of {limit}")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// The sink handed to [`encode_to`](crate::encode_to) failed.
    #[error("write to sink failed: {0}")]
    Sink(#[from] std::io::Error),
}

/// The category of an [`Error`], comparable and copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidJson`].
    InvalidJson,
    /// See [`Error::UnsupportedType`].
    UnsupportedType,
    /// See [`Error::CircularReference`].
    CircularReference,
    /// See [`Error::DepthExceeded`].
    DepthExceeded,
    /// See [`Error::Sink`].
    Sink,
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidJson(_) => ErrorKind::InvalidJson,
            Self::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Self::CircularReference(_) => ErrorKind::CircularReference,
            Self::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            Self::Sink(_) => ErrorKind::Sink,
        }
    }

    pub(crate) fn invalid(msg: impl Display) -> Self {
        Self::InvalidJson(msg.to_string())
    }

    /// `InvalidJson` with the offending input appended.
    pub(crate) fn invalid_at(msg: impl Display, input: &[u8]) -> Self {
        Self::InvalidJson(format!("{msg}: {}", snippet(input)))
    }

    pub(crate) fn unsupported(msg: impl Display) -> Self {
        Self::UnsupportedType(msg.to_string())
    }
}

/// Renders at most [`SNIPPET_LIMIT`] bytes of `input`, lossily.
pub(crate) fn snippet(input: &[u8]) -> String {
    if input.len() <= SNIPPET_LIMIT {
        return BStr::new(input).to_string();
    }
    // Back off to a char boundary so the excerpt never ends mid-sequence.
    let mut end = SNIPPET_LIMIT;
    while end > 0 && input[end] & 0xC0 == 0x80 {
        end -= 1;
    }
    format!("{}...", BStr::new(&input[..end]))
}
