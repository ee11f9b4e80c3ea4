//! Metrics collection and reporting for a decode run.
//!
//! One [`DecodeMetrics`] value is filled in by the decoder as it moves through
//! the stream and returned on success. The struct is plain data; nothing is
//! shared between runs.

use std::time::{Duration, Instant};

/// Observable results of one successful decode.
#[derive(Debug, Clone)]
pub struct DecodeMetrics {
    // === Timing ===
    /// When decoding started
    pub start_time: Instant,

    /// When decoding ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input/Output ===
    /// Size of the compressed stream
    pub input_bytes: u64,

    /// Bytes emitted to the sink
    pub output_bytes: u64,

    /// CRC-32 of the emitted bytes
    pub output_crc32: u32,

    // === Decoding table ===
    /// Leaves in the decoding table
    pub tree_leaves: u64,

    /// Longest code length
    pub tree_depth: u64,

    /// Bits taken by the serialized table
    pub table_bits: u64,

    // === Framing ===
    /// Symbols emitted
    pub symbols_decoded: u64,

    /// Full 4096-symbol chunks
    pub full_chunks: u64,

    /// Symbols in the final partial chunk
    pub final_chunk_symbols: u64,

    /// Padding bits skipped at the end
    pub padding_bits: u64,
}

impl DecodeMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            output_crc32: 0,
            tree_leaves: 0,
            tree_depth: 0,
            table_bits: 0,
            symbols_decoded: 0,
            full_chunks: 0,
            final_chunk_symbols: 0,
            padding_bits: 0,
        }
    }

    /// Mark the decode as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (compressed / decoded).
    ///
    /// Returns 0.0 if nothing was decoded.
    pub fn compression_ratio(&self) -> f64 {
        if self.output_bytes == 0 {
            0.0
        } else {
            self.input_bytes as f64 / self.output_bytes as f64
        }
    }

    /// Compute decoded throughput in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.output_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Decode Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("Input:  {} bytes ({:.2} KiB)", self.input_bytes, self.input_bytes as f64 / 1024.0);
        println!("Output: {} bytes ({:.2} KiB)", self.output_bytes, self.output_bytes as f64 / 1024.0);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("CRC-32: {:#010x}", self.output_crc32);
        println!();

        println!("=== Decoding Table ===");
        println!("Leaves: {}", self.tree_leaves);
        println!("Depth: {}", self.tree_depth);
        println!("Table size: {} bits", self.table_bits);
        println!();

        println!("=== Framing ===");
        println!("Symbols: {}", self.symbols_decoded);
        println!("Full chunks: {}", self.full_chunks);
        println!("Final chunk: {} symbols", self.final_chunk_symbols);
        println!("Padding: {} bits", self.padding_bits);
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             output_crc32={:08x}\n\
             tree_leaves={}\n\
             tree_depth={}\n\
             symbols_decoded={}\n\
             full_chunks={}\n\
             final_chunk_symbols={}\n\
             padding_bits={}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.output_bytes,
            self.output_crc32,
            self.tree_leaves,
            self.tree_depth,
            self.symbols_decoded,
            self.full_chunks,
            self.final_chunk_symbols,
            self.padding_bits,
        )
    }
}

impl Default for DecodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = DecodeMetrics::new();
        assert!(metrics.end_time.is_none());
        assert!(metrics.duration().as_millis() < 100);
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = DecodeMetrics::new();
        assert_eq!(metrics.compression_ratio(), 0.0);

        metrics.input_bytes = 750;
        metrics.output_bytes = 1000;
        assert_eq!(metrics.compression_ratio(), 0.75);
    }

    #[test]
    fn test_throughput() {
        let mut metrics = DecodeMetrics::new();
        metrics.output_bytes = 1_000_000;

        std::thread::sleep(Duration::from_millis(10));
        metrics.complete();

        assert!(metrics.throughput_bps() > 0.0);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = DecodeMetrics::new();
        metrics.output_bytes = 8192;
        metrics.full_chunks = 2;
        metrics.output_crc32 = 0xDEADBEEF;

        let text = metrics.export_text();
        assert!(text.contains("output_bytes=8192"));
        assert!(text.contains("full_chunks=2"));
        assert!(text.contains("output_crc32=deadbeef"));
    }
}
