//! Chunked decode loop.
//!
//! # Stream Format
//!
//! ```text
//! +----------------------------+
//! | decoding table             |  pre-order tree, see `tree`
//! +----------------------------+
//! | 1 | 4096 codes             |  zero or more full chunks
//! +----------------------------+
//! | 0                          |  end of full chunks
//! +----------------------------+
//! | n (12 bits)                |  0..=4095
//! +----------------------------+
//! | n codes                    |  final chunk
//! +----------------------------+
//! | padding                    |  to the next byte boundary, any value
//! +----------------------------+
//! ```
//!
//! No field is byte aligned except the end of the stream. After padding,
//! the input must be exhausted; leftover bytes fail the whole decode.
//!
//! A payload that is an exact multiple of 4096 symbols still ends with a
//! `0` bit and a final count of 0.

use crate::bitio::BitCursor;
use crate::error::{Result, StreamError};
use crate::metrics::DecodeMetrics;
use crate::sink::SymbolSink;
use crate::tree::{PrefixTree, DEFAULT_MAX_TREE_DEPTH};

/// Symbols in every chunk announced by a `1` continuation bit.
pub const CHUNK_SYMBOLS: usize = 4096;

/// Width of the final chunk's symbol count.
pub const FINAL_COUNT_BITS: usize = 12;

/// Decoder tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Deepest decoding table accepted
    pub max_tree_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }
}

/// One decode session over a fully loaded stream.
///
/// Consumed by [`Decoder::run`]; a session is never reused.
pub struct Decoder<'a> {
    cursor: BitCursor<'a>,
    options: DecoderOptions,
    metrics: DecodeMetrics,
    checksum: crc32fast::Hasher,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, DecoderOptions::default())
    }

    pub fn with_options(input: &'a [u8], options: DecoderOptions) -> Self {
        let mut metrics = DecodeMetrics::new();
        metrics.input_bytes = input.len() as u64;
        Self {
            cursor: BitCursor::new(input),
            options,
            metrics,
            checksum: crc32fast::Hasher::new(),
        }
    }

    /// Decode the whole stream into `sink`.
    ///
    /// On error the sink may already hold part of the output; it must be
    /// treated as invalid.
    ///
    /// # Errors
    /// - `BitIoError::OutOfData` if the stream ends early anywhere
    /// - `SymbolError::*` / `TreeError::TooDeep` if the table is rejected
    /// - `StreamError::TrailingData` if bytes follow the final padding
    /// - whatever the sink returns
    pub fn run<S: SymbolSink + ?Sized>(mut self, sink: &mut S) -> Result<DecodeMetrics> {
        let tree = PrefixTree::read_with_max_depth(&mut self.cursor, self.options.max_tree_depth)?;
        self.metrics.tree_leaves = tree.leaf_count() as u64;
        self.metrics.tree_depth = tree.depth() as u64;
        self.metrics.table_bits = self.cursor.position() as u64;

        while self.cursor.next_bit()? {
            self.emit_symbols(&tree, CHUNK_SYMBOLS, &mut *sink)?;
            self.metrics.full_chunks += 1;
            tracing::trace!(chunk = self.metrics.full_chunks, "full chunk decoded");
        }

        let final_count = usize::from(self.cursor.next_u12()?);
        tracing::debug!(
            full_chunks = self.metrics.full_chunks,
            final_count,
            "decoding final chunk"
        );
        self.emit_symbols(&tree, final_count, sink)?;
        self.metrics.final_chunk_symbols = final_count as u64;

        self.finalize()
    }

    fn emit_symbols<S: SymbolSink + ?Sized>(
        &mut self,
        tree: &PrefixTree,
        count: usize,
        sink: &mut S,
    ) -> Result<()> {
        for _ in 0..count {
            let symbol = tree.decode_symbol(&mut self.cursor)?;
            sink.emit(&symbol)?;
            self.checksum.update(symbol.as_bytes());
            self.metrics.output_bytes += symbol.len() as u64;
        }
        self.metrics.symbols_decoded += count as u64;
        Ok(())
    }

    /// Skip padding and require the input to be exhausted.
    fn finalize(mut self) -> Result<DecodeMetrics> {
        self.metrics.padding_bits = self.cursor.align_to_byte_boundary() as u64;
        if self.cursor.has_more_data() {
            let remaining = self.cursor.bytes_remaining();
            tracing::debug!(remaining, "trailing data after padding");
            return Err(StreamError::TrailingData { remaining }.into());
        }

        self.metrics.output_crc32 = self.checksum.finalize();
        self.metrics.complete();
        tracing::debug!(
            symbols = self.metrics.symbols_decoded,
            output_bytes = self.metrics.output_bytes,
            "stream decoded"
        );
        Ok(self.metrics)
    }
}

/// Decode `input` into `sink` with default options.
pub fn decode<S: SymbolSink + ?Sized>(input: &[u8], sink: &mut S) -> Result<DecodeMetrics> {
    Decoder::new(input).run(sink)
}

/// Decode `input` into `sink`.
pub fn decode_with_options<S: SymbolSink + ?Sized>(
    input: &[u8],
    sink: &mut S,
    options: DecoderOptions,
) -> Result<DecodeMetrics> {
    Decoder::with_options(input, options).run(sink)
}

/// Decode `input` into a fresh buffer; nothing is returned on failure.
pub fn decode_to_vec(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decode(input, &mut out)?;
    Ok(out)
}
