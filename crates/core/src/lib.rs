//! huffdec-core: decoder for chunk-framed Huffman streams
//!
//! A stream carries its own decoding table, a serialized prefix-code tree
//! whose leaves hold 1-4 byte UTF-8-shaped symbols, followed by the encoded
//! symbols in 4096-symbol chunks and a final partial chunk. Fields are packed
//! at bit granularity; only the end of the stream is padded to a byte.
//!
//! # Architecture
//!
//! - `bitio`: Bit cursor over the input buffer (and a writer for fixtures)
//! - `symbol`: UTF-8-shaped symbol validation
//! - `tree`: Decoding table reconstruction and per-symbol tree walks
//! - `decoder`: Chunked decode loop and end-of-stream checks
//! - `sink`: Destinations for decoded symbols
//! - `file`: Whole-file decompression with no partial output on failure
//! - `metrics`: Observable decode statistics
//!
//! # Example
//!
//! ```
//! // Table `0 1'A' 1'B'`, final chunk of 2 symbols, codes `0` then `1`
//! let stream: [u8; 5] = [0x50, 0x68, 0x40, 0x02, 0x40];
//! assert_eq!(huffdec_core::decode_to_vec(&stream).unwrap(), b"AB");
//! ```

pub mod bitio;
pub mod decoder;
pub mod error;
pub mod file;
pub mod metrics;
pub mod sink;
pub mod symbol;
pub mod tree;

// Re-export commonly used types
pub use decoder::{decode, decode_to_vec, decode_with_options, Decoder, DecoderOptions};
pub use error::{Error, ErrorKind, Result};
pub use file::{decompress_file, decompress_file_with_options, files_identical};
pub use metrics::DecodeMetrics;
pub use sink::{SymbolSink, WriterSink};
pub use symbol::Symbol;
pub use tree::PrefixTree;
