//! Error types for the huffdec decoder.
//!
//! Every failure is terminal for the decode invocation that hit it: nothing is
//! retried internally. Errors are grouped by the stage that raises them and
//! flattened into an [`ErrorKind`] for callers that only care about the class.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all decoder operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading past the end of the input buffer
/// - Symbol: a tree leaf carries a malformed UTF-8-shaped payload
/// - Tree: the serialized table nests deeper than allowed
/// - Stream: framing violations after the last symbol
/// - Source/Sink: the file layer could not read input or write output
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Leaf symbol failed UTF-8 structure or code point validation
    #[error("symbol error: {0}")]
    Symbol(#[from] SymbolError),

    /// Decoding table could not be built
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Stream framing error
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// Input could not be opened or fully read
    #[error("cannot read source {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be opened, written, or closed
    #[error("cannot write sink {}: {source}", .path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Bit-level I/O errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("out of data at bit {position}: requested {requested} bits, {available} available")]
    OutOfData {
        position: usize,
        requested: usize,
        available: usize,
    },

    /// Invalid bit count (more than a single read can return)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Leaf symbol validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// Leading byte maps to no length, or a continuation byte is not `10xxxxxx`
    #[error("invalid UTF-8 structure: byte {byte:#04x} at offset {offset} of symbol")]
    InvalidUtf8Structure { byte: u8, offset: usize },

    /// Code point outside the range required for its byte length
    #[error("invalid code point U+{code_point:04X} for a {len}-byte symbol")]
    InvalidCodePoint { code_point: u32, len: usize },
}

/// Decoding table errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Tree nests deeper than the configured limit
    #[error("tree depth exceeds maximum {max}")]
    TooDeep { max: usize },
}

/// Stream framing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Bytes remain after the final padding byte
    #[error("{remaining} trailing bytes after end of stream")]
    TrailingData { remaining: usize },
}

/// Flat classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SourceUnavailable,
    OutOfData,
    InvalidBitCount,
    InvalidUtf8Structure,
    InvalidCodePoint,
    TreeTooDeep,
    TrailingData,
    SinkUnavailable,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BitIo(BitIoError::OutOfData { .. }) => ErrorKind::OutOfData,
            Error::BitIo(BitIoError::InvalidBitCount(_)) => ErrorKind::InvalidBitCount,
            Error::Symbol(SymbolError::InvalidUtf8Structure { .. }) => {
                ErrorKind::InvalidUtf8Structure
            }
            Error::Symbol(SymbolError::InvalidCodePoint { .. }) => ErrorKind::InvalidCodePoint,
            Error::Tree(TreeError::TooDeep { .. }) => ErrorKind::TreeTooDeep,
            Error::Stream(StreamError::TrailingData { .. }) => ErrorKind::TrailingData,
            Error::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Error::SinkUnavailable { .. } => ErrorKind::SinkUnavailable,
        }
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
