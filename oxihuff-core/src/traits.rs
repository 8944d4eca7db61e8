//! Bit channel traits.
//!
//! The Huffman codec never touches bytes directly. It reads and writes one
//! bit at a time through these traits, so any medium that can hand out bits
//! sequentially (a file, an in-memory buffer, a socket) can carry a
//! compressed stream.

use crate::error::{CoreError, Result};

/// A sequential source of bits, most significant bit of each byte first.
pub trait BitSource {
    /// Read the next bit.
    ///
    /// Returns [`CoreError::UnexpectedEof`] once the underlying medium is
    /// exhausted.
    fn read_bit(&mut self) -> Result<bool>;

    /// Number of bits consumed so far.
    fn bit_position(&self) -> u64;

    /// Read a fixed-width unsigned value, first bit read is the most
    /// significant.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (1-32)
    fn read_bits(&mut self, count: u8) -> Result<u32> {
        if count == 0 || count > 32 {
            return Err(CoreError::InvalidBitCount(count));
        }

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Ok(value)
    }
}

/// A sequential sink of bits, most significant bit of each byte first.
pub trait BitSink {
    /// Append one bit.
    fn write_bit(&mut self, bit: bool) -> Result<()>;

    /// Number of bits written so far.
    fn bits_written(&self) -> u64;

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// # Arguments
    ///
    /// * `value` - The value whose low bits are written
    /// * `count` - Number of bits to write (1-32)
    fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count == 0 || count > 32 {
            return Err(CoreError::InvalidBitCount(count));
        }

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }
}

impl<T: BitSource + ?Sized> BitSource for &mut T {
    fn read_bit(&mut self) -> Result<bool> {
        (**self).read_bit()
    }

    fn bit_position(&self) -> u64 {
        (**self).bit_position()
    }
}

impl<T: BitSink + ?Sized> BitSink for &mut T {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        (**self).write_bit(bit)
    }

    fn bits_written(&self) -> u64 {
        (**self).bits_written()
    }
}

/// An in-memory bit sink that records every bit, used to inspect exact
/// layouts.
impl BitSink for Vec<bool> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.push(bit);
        Ok(())
    }

    fn bits_written(&self) -> u64 {
        self.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed bit pattern.
    struct Replay {
        bits: Vec<bool>,
        pos: usize,
    }

    impl BitSource for Replay {
        fn read_bit(&mut self) -> Result<bool> {
            let bit = *self
                .bits
                .get(self.pos)
                .ok_or(CoreError::unexpected_eof(self.pos as u64))?;
            self.pos += 1;
            Ok(bit)
        }

        fn bit_position(&self) -> u64 {
            self.pos as u64
        }
    }

    #[test]
    fn test_write_bits_msb_first() {
        let mut bits = Vec::new();
        bits.write_bits(0b1011, 4).unwrap();
        assert_eq!(bits, vec![true, false, true, true]);
        assert_eq!(bits.bits_written(), 4);
    }

    #[test]
    fn test_read_bits_default() {
        let mut src = Replay {
            bits: vec![true, false, false, true, true],
            pos: 0,
        };
        assert_eq!(src.read_bits(3).unwrap(), 0b100);
        assert_eq!(src.read_bits(2).unwrap(), 0b11);
        assert!(src.read_bit().unwrap_err().is_eof());
    }

    #[test]
    fn test_invalid_counts() {
        let mut bits = Vec::new();
        assert!(matches!(
            bits.write_bits(0, 0),
            Err(CoreError::InvalidBitCount(0))
        ));
        assert!(matches!(
            bits.write_bits(0, 33),
            Err(CoreError::InvalidBitCount(33))
        ));
    }
}
