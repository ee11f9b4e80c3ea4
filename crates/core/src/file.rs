//! File-level decompression.
//!
//! The input file is read whole before decoding starts. Output goes to a
//! `.partial` sibling of the destination and is renamed into place only
//! after the stream has been fully validated, so a failed decode never
//! leaves a truncated file under the destination name.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::decoder::{Decoder, DecoderOptions};
use crate::error::{Error, Result};
use crate::metrics::DecodeMetrics;
use crate::sink::WriterSink;

/// Decode `input` into `output` with default options.
pub fn decompress_file(input: &Path, output: &Path) -> Result<DecodeMetrics> {
    decompress_file_with_options(input, output, DecoderOptions::default())
}

/// Decode `input` into `output`.
///
/// # Errors
/// - `Error::SourceUnavailable` if `input` cannot be read
/// - `Error::SinkUnavailable` if `output` cannot be created, written, or moved into place
/// - any decode error; `output` is left untouched in that case
pub fn decompress_file_with_options(
    input: &Path,
    output: &Path,
    options: DecoderOptions,
) -> Result<DecodeMetrics> {
    let data = read_source(input)?;
    tracing::debug!(path = %input.display(), bytes = data.len(), "source loaded");

    let partial = partial_path(output);
    let file = File::create(&partial).map_err(|source| Error::SinkUnavailable {
        path: partial.clone(),
        source,
    })?;
    let mut sink = WriterSink::new(BufWriter::new(file), &partial);

    let result = Decoder::with_options(&data, options)
        .run(&mut sink)
        .and_then(|metrics| sink.finish().map(|_| metrics));

    let metrics = match result {
        Ok(metrics) => metrics,
        Err(err) => {
            tracing::warn!(path = %input.display(), error = %err, "decode failed, discarding partial output");
            // The writer was dropped above, so the file is closed.
            let _ = fs::remove_file(&partial);
            return Err(err);
        }
    };

    fs::rename(&partial, output).map_err(|source| {
        let _ = fs::remove_file(&partial);
        Error::SinkUnavailable {
            path: output.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        bytes = metrics.output_bytes,
        "decompressed"
    );
    Ok(metrics)
}

/// Byte-for-byte comparison of two files.
///
/// # Errors
/// `Error::SourceUnavailable` if either file cannot be read.
pub fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    let left = read_source(a)?;
    let right = read_source(b)?;
    Ok(left == right)
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// `out.txt` -> `out.txt.partial`
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".partial");
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/out.txt")),
            PathBuf::from("/tmp/out.txt.partial")
        );
        assert_eq!(partial_path(Path::new("out")), PathBuf::from("out.partial"));
    }
}
