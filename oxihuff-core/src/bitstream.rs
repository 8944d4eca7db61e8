//! Bit-level I/O over byte streams.
//!
//! This module provides `BitReader` and `BitWriter`, the bit channel the
//! Huffman codec reads and writes through.
//!
//! # Bit Ordering
//!
//! Everything is MSB-first (Most Significant Bit first): the first bit
//! written lands in bit 7 of the first byte, and fixed-width fields are
//! written from their most significant bit down. A 32-bit field written this
//! way occupies four bytes in big-endian order when it starts on a byte
//! boundary.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//!
//! // Writing bits
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//! writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//! let output = writer.into_inner().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(output.as_slice());
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{CoreError, Result};
use crate::traits::{BitSink, BitSource};
use std::io::{ErrorKind, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// `BitReader` keeps up to 64 bits of look-ahead so that single-bit reads
/// don't hit the underlying reader for every byte. Wrap unbuffered sources
/// such as files in a `BufReader` anyway; the reader asks for at most 8
/// bytes at a time.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer (MSB-first, valid bits are the low `bits_in_buffer`).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Ensure at least `count` bits are available in the buffer.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        debug_assert!(count <= 56, "Cannot fill more than 56 bits at once");

        while self.bits_in_buffer < count {
            let room = ((64 - self.bits_in_buffer) / 8) as usize;
            let mut temp_buf = [0u8; 8];
            let n = match self.reader.read(&mut temp_buf[..room]) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if n == 0 {
                return Err(CoreError::unexpected_eof(self.total_bits_read));
            }

            for &byte in &temp_buf[..n] {
                self.buffer = (self.buffer << 8) | u64::from(byte);
                self.bits_in_buffer += 8;
            }
        }

        Ok(())
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        self.fill_buffer(1)?;
        self.bits_in_buffer -= 1;
        self.total_bits_read += 1;
        Ok((self.buffer >> self.bits_in_buffer) & 1 == 1)
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (1-32)
    ///
    /// # Returns
    ///
    /// The bits read as a u32, with the first bit read in the most
    /// significant position of the result.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        if count == 0 || count > 32 {
            return Err(CoreError::InvalidBitCount(count));
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = (self.buffer >> shift) & mask;

        self.bits_in_buffer -= count;
        self.total_bits_read += u64::from(count);

        Ok(value as u32)
    }

    /// Discard bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        let remainder = (self.total_bits_read % 8) as u8;
        if remainder > 0 {
            let skip = (8 - remainder).min(self.bits_in_buffer);
            self.bits_in_buffer -= skip;
            self.total_bits_read += u64::from(skip);
        }
    }

    /// Check if the reader is at end of stream.
    ///
    /// Buffered bits count as available, so this returns `false` while
    /// padding bits of the final byte remain unread.
    pub fn is_eof(&mut self) -> bool {
        self.bits_in_buffer == 0 && self.fill_buffer(8).is_err()
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bit(&mut self) -> Result<bool> {
        BitReader::read_bit(self)
    }

    fn bit_position(&self) -> u64 {
        self.total_bits_read
    }

    fn read_bits(&mut self, count: u8) -> Result<u32> {
        BitReader::read_bits(self, count)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and writes complete
/// bytes to the underlying writer. Call `flush()` or `into_inner()` when
/// done: the final partial byte is only emitted, zero padded, at that
/// point.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (MSB-first, valid bits are the low `bits_in_buffer`).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Consume this `BitWriter` and return the underlying writer.
    ///
    /// This flushes any remaining bits (zero padded) before returning.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Get the total number of bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        let mut bytes = [0u8; 8];
        let mut n = 0;
        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            bytes[n] = (self.buffer >> self.bits_in_buffer) as u8;
            n += 1;
        }
        if n > 0 {
            self.writer.write_all(&bytes[..n])?;
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buffer = (self.buffer << 1) | u64::from(bit);
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer >= 32 {
            self.flush_bytes()?;
        }

        Ok(())
    }

    /// Write up to 32 bits to the stream.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write; the low `count` bits are written,
    ///   most significant first
    /// * `count` - Number of bits to write (1-32)
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count == 0 || count > 32 {
            return Err(CoreError::InvalidBitCount(count));
        }

        if self.bits_in_buffer > 24 {
            self.flush_bytes()?;
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (u64::from(value) & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        self.flush_bytes()
    }

    /// Pad to byte boundary with zeros.
    pub fn align_to_byte(&mut self) -> Result<()> {
        let remainder = self.bits_in_buffer % 8;
        if remainder != 0 {
            let padding = 8 - remainder;
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
        }
        self.flush_bytes()
    }

    /// Flush any remaining bits to the underlying writer.
    ///
    /// If there are partial bits, they are padded with zeros to complete
    /// the final byte. Padding is not counted in [`bits_written`].
    ///
    /// [`bits_written`]: BitWriter::bits_written
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        BitWriter::write_bit(self, bit)
    }

    fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        BitWriter::write_bits(self, value, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let data = [0xB5u8];
        let mut reader = BitReader::new(&data[..]);

        assert!(reader.read_bit().unwrap()); // MSB first
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.bits_read(), 8);
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = [0xF0u8, 0x0F];
        let mut reader = BitReader::new(&data[..]);

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0x00); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
    }

    #[test]
    fn test_bitreader_u32_big_endian() {
        let data = [0x00u8, 0x00, 0x01, 0x02, 0xFF];
        let mut reader = BitReader::new(&data[..]);
        assert_eq!(reader.read_bits(32).unwrap(), 0x0102);
        assert_eq!(reader.read_bits(8).unwrap(), 0xFF);
    }

    #[test]
    fn test_bitreader_eof() {
        let data = [0xAAu8];
        let mut reader = BitReader::new(&data[..]);
        reader.read_bits(6).unwrap();
        let err = reader.read_bits(3).unwrap_err();
        assert!(matches!(err, CoreError::UnexpectedEof { bit_position: 6 }));
    }

    #[test]
    fn test_bitreader_is_eof() {
        let data = [0x80u8];
        let mut reader = BitReader::new(&data[..]);
        assert!(!reader.is_eof());
        reader.read_bits(8).unwrap();
        assert!(reader.is_eof());
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut writer = BitWriter::new(Vec::new());
        // Write 0b10110101 bit by bit
        for bit in [true, false, true, true, false, true, false, true] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.into_inner().unwrap(), vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_padding() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        assert_eq!(writer.bits_written(), 3);
        // 101 padded with five zeros
        assert_eq!(writer.into_inner().unwrap(), vec![0b1010_0000]);
    }

    #[test]
    fn test_bitwriter_u32() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xDEADBEEF, 32).unwrap();
        writer.write_bit(true).unwrap();
        assert_eq!(
            writer.into_inner().unwrap(),
            vec![0xDE, 0xAD, 0xBE, 0xEF, 0x80]
        );
    }

    #[test]
    fn test_roundtrip() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        writer.write_bits(0b10, 2).unwrap();
        writer.write_bits(0b110011, 6).unwrap();
        writer.write_bits(u32::MAX, 32).unwrap();
        let output = writer.into_inner().unwrap();

        let mut reader = BitReader::new(output.as_slice());
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
        assert_eq!(reader.read_bits(32).unwrap(), u32::MAX);
    }

    #[test]
    fn test_long_single_bit_run() {
        let mut writer = BitWriter::new(Vec::new());
        for i in 0..1000 {
            writer.write_bit(i % 3 == 0).unwrap();
        }
        let output = writer.into_inner().unwrap();
        assert_eq!(output.len(), 125);

        let mut reader = BitReader::new(output.as_slice());
        for i in 0..1000 {
            assert_eq!(reader.read_bit().unwrap(), i % 3 == 0, "bit {}", i);
        }
    }

    #[test]
    fn test_align_to_byte() {
        let data = [0xFFu8, 0xAA];
        let mut reader = BitReader::new(&data[..]);

        reader.read_bits(3).unwrap();
        reader.align_to_byte();
        assert_eq!(reader.read_bits(8).unwrap(), 0xAA);
    }

    #[test]
    fn test_trait_objects() {
        let mut writer = BitWriter::new(Vec::new());
        {
            let sink: &mut dyn BitSink = &mut writer;
            sink.write_bits(0x5, 4).unwrap();
            sink.write_bits(0xA, 4).unwrap();
        }
        let output = writer.into_inner().unwrap();
        let mut reader = BitReader::new(output.as_slice());
        let source: &mut dyn BitSource = &mut reader;
        assert_eq!(source.read_bits(8).unwrap(), 0x5A);
        assert_eq!(source.bit_position(), 8);
    }
}
