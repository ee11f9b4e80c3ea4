//! UTF-8-shaped symbols carried by decoding-table leaves.
//!
//! A symbol is one to four bytes laid out like a UTF-8 code unit sequence.
//! The validators here are pure functions; [`Symbol`] can only be built
//! through them, so every symbol held by a tree is known to be well formed.
//!
//! Validation follows the structural rules (leading byte prefix, `10xxxxxx`
//! continuation bytes) and the minimum range for each length, which rejects
//! overlong encodings. Surrogate code points are not rejected.

use std::fmt;

use crate::bitio::BitCursor;
use crate::error::{Result, SymbolError};

/// Longest symbol, in bytes.
pub const MAX_SYMBOL_LEN: usize = 4;

/// Expected total symbol length implied by a leading byte.
///
/// Returns 0 for bytes that cannot start a symbol: continuation bytes
/// (`10xxxxxx`) and anything from `0b1111_1000` upward.
pub fn byte_count_from_lead_byte(byte: u8) -> usize {
    match byte {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

/// True iff `byte` matches `10xxxxxx`.
pub fn is_valid_continuation_byte(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Assemble the code point carried by a 1-4 byte sequence.
///
/// Payload bits of the leading byte come first, then six bits per
/// continuation byte. Structure is not checked here.
fn assemble_code_point(bytes: &[u8]) -> u32 {
    let lead_mask = match bytes.len() {
        1 => 0x7F,
        2 => 0x1F,
        3 => 0x0F,
        _ => 0x07,
    };
    bytes[1..].iter().fold(u32::from(bytes[0] & lead_mask), |cp, &b| {
        (cp << 6) | u32::from(b & 0x3F)
    })
}

/// True iff the code point assembled from `bytes` lies in the range its
/// length requires.
///
/// One-byte sequences are always valid. Sequences shorter than one or longer
/// than four bytes never are.
pub fn is_valid_code_point(bytes: &[u8]) -> bool {
    if bytes.is_empty() || bytes.len() > MAX_SYMBOL_LEN {
        return false;
    }
    let code_point = assemble_code_point(bytes);
    match bytes.len() {
        1 => true,
        2 => (0x80..=0x7FF).contains(&code_point),
        3 => (0x800..=0xFFFF).contains(&code_point),
        _ => (0x1_0000..=0x10_FFFF).contains(&code_point),
    }
}

/// A validated symbol of 1 to 4 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    bytes: [u8; MAX_SYMBOL_LEN],
    len: u8,
}

impl Symbol {
    /// Validate `bytes` as one complete symbol.
    ///
    /// # Errors
    /// - `SymbolError::InvalidUtf8Structure` for a bad leading byte, a bad
    ///   continuation byte, or a length that disagrees with the leading byte
    /// - `SymbolError::InvalidCodePoint` for an overlong encoding or a value
    ///   above U+10FFFF
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Some(&lead) = bytes.first() else {
            return Err(SymbolError::InvalidUtf8Structure { byte: 0, offset: 0 }.into());
        };
        let len = byte_count_from_lead_byte(lead);
        if len == 0 {
            return Err(SymbolError::InvalidUtf8Structure { byte: lead, offset: 0 }.into());
        }
        if bytes.len() != len {
            let offset = bytes.len().min(len);
            let byte = bytes.get(offset).copied().unwrap_or(0);
            return Err(SymbolError::InvalidUtf8Structure { byte, offset }.into());
        }
        if let Some((offset, &byte)) = bytes
            .iter()
            .enumerate()
            .skip(1)
            .find(|&(_, &b)| !is_valid_continuation_byte(b))
        {
            return Err(SymbolError::InvalidUtf8Structure { byte, offset }.into());
        }
        Self::checked(bytes)
    }

    /// Read one symbol from the cursor: a leading byte, then as many
    /// continuation bytes as it announces.
    ///
    /// Fails as soon as a byte is rejected; later bytes are not read.
    pub fn read(cursor: &mut BitCursor<'_>) -> Result<Self> {
        let lead = cursor.next_byte()?;
        let len = byte_count_from_lead_byte(lead);
        if len == 0 {
            return Err(SymbolError::InvalidUtf8Structure { byte: lead, offset: 0 }.into());
        }

        let mut bytes = [0u8; MAX_SYMBOL_LEN];
        bytes[0] = lead;
        for (offset, slot) in bytes.iter_mut().enumerate().take(len).skip(1) {
            let byte = cursor.next_byte()?;
            if !is_valid_continuation_byte(byte) {
                return Err(SymbolError::InvalidUtf8Structure { byte, offset }.into());
            }
            *slot = byte;
        }
        Self::checked(&bytes[..len])
    }

    /// Range check on a structurally valid sequence.
    fn checked(bytes: &[u8]) -> Result<Self> {
        if !is_valid_code_point(bytes) {
            return Err(SymbolError::InvalidCodePoint {
                code_point: assemble_code_point(bytes),
                len: bytes.len(),
            }
            .into());
        }
        let mut buf = [0u8; MAX_SYMBOL_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: buf,
            len: bytes.len() as u8,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; a symbol holds at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The code point this symbol encodes.
    pub fn code_point(&self) -> u32 {
        assemble_code_point(self.as_bytes())
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        let mut bytes = [0u8; MAX_SYMBOL_LEN];
        let len = c.encode_utf8(&mut bytes).len();
        Self {
            bytes,
            len: len as u8,
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match char::from_u32(self.code_point()) {
            Some(c) => write!(f, "Symbol({c:?})"),
            None => write!(f, "Symbol(U+{:04X})", self.code_point()),
        }
    }
}
