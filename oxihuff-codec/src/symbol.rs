//! Alphabet symbols.

use std::fmt;

/// Numeric value of the pseudo-EOF symbol, one past the byte range.
pub const PSEUDO_EOF_VALUE: u16 = 256;

/// A symbol stored in a Huffman leaf.
///
/// Ordinary symbols are bytes. The pseudo-EOF is a synthetic symbol that
/// never occurs in the input; encoding it after the last byte lets a
/// decoder stop without knowing the symbol count up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A byte of input data.
    Byte(u8),
    /// The end-of-stream marker.
    PseudoEof,
}

impl Symbol {
    /// Numeric value: 0-255 for bytes, 256 for the pseudo-EOF.
    pub fn value(self) -> u16 {
        match self {
            Symbol::Byte(b) => u16::from(b),
            Symbol::PseudoEof => PSEUDO_EOF_VALUE,
        }
    }

    /// Inverse of [`Symbol::value`].
    pub fn from_value(value: u16) -> Option<Self> {
        match value {
            0..=255 => Some(Symbol::Byte(value as u8)),
            PSEUDO_EOF_VALUE => Some(Symbol::PseudoEof),
            _ => None,
        }
    }

    /// Index into symbol-indexed tables.
    pub(crate) fn index(self) -> usize {
        self.value() as usize
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Byte(byte)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
