//! Destinations for decoded symbols.
//!
//! The decoder hands every symbol to a [`SymbolSink`] as soon as it is
//! decoded. Sinks do not see failures: if a decode aborts, whatever a sink
//! has already received is invalid and the owner must discard it.

use std::io::Write;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Receives decoded symbols in stream order.
pub trait SymbolSink {
    /// Accept the next symbol.
    ///
    /// # Errors
    /// `Error::SinkUnavailable` if the symbol cannot be stored.
    fn emit(&mut self, symbol: &Symbol) -> Result<()>;
}

impl SymbolSink for Vec<u8> {
    fn emit(&mut self, symbol: &Symbol) -> Result<()> {
        self.extend_from_slice(symbol.as_bytes());
        Ok(())
    }
}

/// Adapts any [`Write`] into a sink.
///
/// `path` only labels errors; the writer may be anything.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
    path: PathBuf,
    bytes_written: u64,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush buffered output and hand back the writer.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush().map_err(|source| Error::SinkUnavailable {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.inner)
    }
}

impl<W: Write> SymbolSink for WriterSink<W> {
    fn emit(&mut self, symbol: &Symbol) -> Result<()> {
        self.inner
            .write_all(symbol.as_bytes())
            .map_err(|source| Error::SinkUnavailable {
                path: self.path.clone(),
                source,
            })?;
        self.bytes_written += symbol.len() as u64;
        Ok(())
    }
}
