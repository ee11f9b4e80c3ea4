//! Bit-granular access to a compressed stream.
//!
//! [`BitCursor`] walks a read-only byte buffer MSB-first, one bit at a time,
//! and is the only way the decoder touches input. [`BitWriter`] is its mirror
//! image; it exists so fixture streams can be assembled bit by bit.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with zeros
//! - BitCursor: [`BitCursor::align_to_byte_boundary`] skips whatever padding
//!   bits remain without looking at their values
//!
//! # Example
//! ```
//! use huffdec_core::bitio::{BitCursor, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bit(true).unwrap();
//! writer.write_bits(0x041, 12).unwrap();
//! let bytes = writer.finish(); // 13 bits, padded to 2 bytes
//!
//! let mut cursor = BitCursor::new(&bytes);
//! assert!(cursor.next_bit().unwrap());
//! assert_eq!(cursor.next_u12().unwrap(), 0x041);
//! cursor.align_to_byte_boundary();
//! assert!(!cursor.has_more_data());
//! ```

use crate::error::{BitIoError, Result};

/// Largest count accepted by [`BitCursor::read_bits`].
pub const MAX_READ_BITS: usize = 32;

/// Reads bits MSB-first from a byte buffer.
///
/// The buffer is never modified; position is a single bit index, so the byte
/// index is `position / 8` and the bit offset within it is `position % 8`.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
/// - `bit_position` only moves forward
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read the next bit.
    ///
    /// # Errors
    /// `BitIoError::OutOfData` if the buffer is exhausted.
    pub fn next_bit(&mut self) -> Result<bool> {
        let byte_idx = self.bit_position / 8;
        let Some(&byte) = self.data.get(byte_idx) else {
            return Err(self.out_of_data(1).into());
        };
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Read the next 8 bits as one byte, regardless of alignment.
    pub fn next_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Read the next 12 bits as an unsigned value in `0..=4095`.
    pub fn next_u12(&mut self) -> Result<u16> {
        Ok(self.read_bits(12)? as u16)
    }

    /// Read `count` bits MSB-first into the low bits of a `u32`.
    ///
    /// Nothing is consumed when the read fails.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 32
    /// - `BitIoError::OutOfData` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u32> {
        if count > MAX_READ_BITS {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(self.out_of_data(count).into());
        }

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.next_bit()?);
        }
        Ok(value)
    }

    /// Skip to the start of the next byte.
    ///
    /// No-op when already aligned, including at the very end of the buffer.
    /// Returns the number of bits skipped.
    pub fn align_to_byte_boundary(&mut self) -> usize {
        let offset = self.bit_position % 8;
        if offset == 0 {
            return 0;
        }
        // A partially read byte always exists in the buffer, so this stays in bounds.
        let skipped = 8 - offset;
        self.bit_position += skipped;
        skipped
    }

    /// True while the cursor points into a byte that exists in the buffer.
    pub fn has_more_data(&self) -> bool {
        self.bit_position / 8 < self.data.len()
    }

    /// Number of whole bytes from the cursor's byte to the end of the buffer.
    pub fn bytes_remaining(&self) -> usize {
        self.data.len().saturating_sub(self.bit_position / 8)
    }

    /// Return the number of bits remaining in the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Length of the underlying buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the underlying buffer holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn out_of_data(&self, requested: usize) -> BitIoError {
        BitIoError::OutOfData {
            position: self.bit_position,
            requested,
            available: self.bits_remaining(),
        }
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// Accumulates bits in a buffer and flushes complete bytes to the output.
/// When finished, pads the final partial byte with zeros.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    pending: u8,
    /// Number of bits in `pending` (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(u64::from(bit), 1)
    }

    /// Append the low `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        for shift in (0..count).rev() {
            let bit = ((value >> shift) & 1) as u8;
            self.pending |= bit << (7 - self.bit_count);
            self.bit_count += 1;

            if self.bit_count == 8 {
                self.bytes.push(self.pending);
                self.pending = 0;
                self.bit_count = 0;
            }
        }

        Ok(())
    }

    /// Append whole bytes, each MSB-first, at the current (possibly unaligned) position.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.write_bits(u64::from(byte), 8)?;
        }
        Ok(())
    }

    /// Finish writing and return the output bytes, zero-padded to a whole byte.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    #[test]
    fn test_next_bit_is_msb_first() {
        let data = [0b1011_0010];
        let mut cursor = BitCursor::new(&data);

        let expected = [true, false, true, true, false, false, true, false];
        for &exp in &expected {
            assert_eq!(cursor.next_bit().unwrap(), exp);
        }
        assert!(!cursor.has_more_data());
    }

    #[test]
    fn test_next_byte_unaligned() {
        // 1 | 0100_0001 | 000_0000
        let data = [0b1010_0000, 0b1000_0000];
        let mut cursor = BitCursor::new(&data);

        assert!(cursor.next_bit().unwrap());
        assert_eq!(cursor.next_byte().unwrap(), b'A');
        assert_eq!(cursor.position(), 9);
    }

    #[test]
    fn test_next_u12() {
        let data = [0xAB, 0xCD];
        let mut cursor = BitCursor::new(&data);

        assert_eq!(cursor.next_u12().unwrap(), 0xABC);
        assert_eq!(cursor.bits_remaining(), 4);

        let mut cursor = BitCursor::new(&[0xFF, 0xF0]);
        assert_eq!(cursor.next_u12().unwrap(), 4095);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0b1010_1010];
        let mut cursor = BitCursor::new(&data);

        assert_eq!(cursor.next_byte().unwrap(), 0b1010_1010);
        let err = cursor.next_bit().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfData);
    }

    #[test]
    fn test_u12_underflow_consumes_nothing() {
        let data = [0xFF];
        let mut cursor = BitCursor::new(&data);

        let err = cursor.next_u12().unwrap_err();
        assert!(matches!(
            err,
            Error::BitIo(BitIoError::OutOfData {
                position: 0,
                requested: 12,
                available: 8
            })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_empty_buffer() {
        let mut cursor = BitCursor::new(&[]);
        assert!(!cursor.has_more_data());
        assert!(cursor.is_empty());
        assert_eq!(cursor.align_to_byte_boundary(), 0);
        assert!(cursor.next_bit().is_err());
    }

    #[test]
    fn test_align_to_byte_boundary() {
        let data = [0xFF, 0x00];
        let mut cursor = BitCursor::new(&data);

        // Aligned at start: no-op
        assert_eq!(cursor.align_to_byte_boundary(), 0);
        assert_eq!(cursor.position(), 0);

        cursor.read_bits(3).unwrap();
        assert_eq!(cursor.align_to_byte_boundary(), 5);
        assert_eq!(cursor.position(), 8);
        assert!(cursor.has_more_data());

        cursor.next_byte().unwrap();
        assert_eq!(cursor.align_to_byte_boundary(), 0);
        assert!(!cursor.has_more_data());
    }

    #[test]
    fn test_align_in_last_byte_exhausts_buffer() {
        let data = [0x80];
        let mut cursor = BitCursor::new(&data);

        cursor.next_bit().unwrap();
        assert!(cursor.has_more_data());
        cursor.align_to_byte_boundary();
        assert!(!cursor.has_more_data());
        assert_eq!(cursor.bytes_remaining(), 0);
    }

    #[test]
    fn test_invalid_bit_count() {
        let mut cursor = BitCursor::new(&[0u8; 8]);
        assert_eq!(
            cursor.read_bits(33).unwrap_err().kind(),
            ErrorKind::InvalidBitCount
        );
    }

    #[test]
    fn test_writer_pads_with_zeros() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        assert_eq!(writer.bit_len(), 5);
        assert_eq!(writer.finish(), vec![0b1011_1000]);
    }

    #[test]
    fn test_writer_unaligned_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bit(false).unwrap();
        writer.write_bytes(&[0xC3, 0xA9]).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b0110_0001, 0b1101_0100, 0b1000_0000]);

        let mut cursor = BitCursor::new(&bytes);
        assert!(!cursor.next_bit().unwrap());
        assert_eq!(cursor.next_byte().unwrap(), 0xC3);
        assert_eq!(cursor.next_byte().unwrap(), 0xA9);
    }
}
