//! Shared fixtures: a stream writer for known symbol sequences and seeded
//! sample text.
//!
//! The writer gives every distinct symbol a code from a balanced tree, which
//! is enough to exercise framing; code lengths are not optimal.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use huffdec_core::bitio::BitWriter;
use huffdec_core::decoder::{CHUNK_SYMBOLS, FINAL_COUNT_BITS};
use huffdec_core::Symbol;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Characters used by [`sample_text`]: mostly ASCII, plus 2, 3 and 4 byte symbols.
const COMMON: &[char] = &[
    'e', 't', 'a', 'o', 'i', 'n', 's', 'h', 'r', 'd', 'l', 'u', ' ', ' ', ' ', '\n', '.', ',',
];
const RARE: &[char] = &['é', 'ß', 'ж', 'λ', '€', '中', '文', '😀', '𝄞'];

type CodeTable = HashMap<Symbol, (u64, usize)>;

/// Encode `text` one `char` per symbol.
pub fn encode_text(text: &str) -> Vec<u8> {
    let symbols: Vec<Symbol> = text.chars().map(Symbol::from).collect();
    encode_symbols(&symbols)
}

/// Encode a symbol sequence into a complete stream.
pub fn encode_symbols(symbols: &[Symbol]) -> Vec<u8> {
    let mut alphabet = symbols.to_vec();
    alphabet.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    alphabet.dedup();
    if alphabet.is_empty() {
        // The table needs at least one leaf even with nothing to encode
        alphabet.push(Symbol::from('?'));
    }

    let mut writer = BitWriter::new();
    let mut codes = CodeTable::new();
    write_table(&mut writer, &alphabet, 0, 0, &mut codes);

    let mut chunks = symbols.chunks_exact(CHUNK_SYMBOLS);
    for chunk in chunks.by_ref() {
        writer.write_bit(true).unwrap();
        write_codes(&mut writer, chunk, &codes);
    }
    let rest = chunks.remainder();
    writer.write_bit(false).unwrap();
    writer
        .write_bits(rest.len() as u64, FINAL_COUNT_BITS)
        .unwrap();
    write_codes(&mut writer, rest, &codes);

    writer.finish()
}

fn write_table(
    writer: &mut BitWriter,
    alphabet: &[Symbol],
    code: u64,
    len: usize,
    codes: &mut CodeTable,
) {
    if let [symbol] = alphabet {
        writer.write_bit(true).unwrap();
        writer.write_bytes(symbol.as_bytes()).unwrap();
        codes.insert(*symbol, (code, len));
        return;
    }

    writer.write_bit(false).unwrap();
    let (left, right) = alphabet.split_at(alphabet.len() / 2);
    write_table(writer, left, code << 1, len + 1, codes);
    write_table(writer, right, (code << 1) | 1, len + 1, codes);
}

fn write_codes(writer: &mut BitWriter, symbols: &[Symbol], codes: &CodeTable) {
    for symbol in symbols {
        let (code, len) = codes[symbol];
        writer.write_bits(code, len).unwrap();
    }
}

/// Deterministic pseudo-text of exactly `symbols` characters.
pub fn sample_text(seed: u64, symbols: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..symbols)
        .map(|_| {
            if rng.gen_bool(0.9) {
                COMMON[rng.gen_range(0..COMMON.len())]
            } else {
                RARE[rng.gen_range(0..RARE.len())]
            }
        })
        .collect()
}

/// A scratch directory removed on drop.
pub struct ScratchDir(PathBuf);

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "huffdec-{}-{}",
            std::process::id(),
            name
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.0.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
