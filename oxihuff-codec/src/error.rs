//! Huffman codec error types.

use crate::symbol::Symbol;
use oxihuff_core::CoreError;
use thiserror::Error;

/// Huffman compression/decompression errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols to build a tree from.
    #[error("Empty alphabet: no symbols to build a Huffman tree from")]
    EmptyAlphabet,

    /// The encoder was asked for a symbol its code table does not contain.
    #[error("No code for symbol {0}")]
    UnknownSymbol(Symbol),

    /// The bit stream ended before the stopping rule was satisfied.
    #[error("Truncated stream at bit position {bit_position}")]
    TruncatedStream {
        /// Bits consumed before the stream ran out.
        bit_position: u64,
    },

    /// A serialized tree description is inconsistent.
    #[error("Malformed tree description: {message}")]
    MalformedDescription {
        /// What was wrong with the description.
        message: String,
    },

    /// Input is too long for the 32-bit symbol count.
    #[error("Input of {len} bytes exceeds the 32-bit symbol count")]
    InputTooLarge {
        /// Length of the rejected input.
        len: usize,
    },

    /// Invalid codec configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;

impl HuffmanError {
    /// Create a malformed description error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDescription {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

impl From<CoreError> for HuffmanError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnexpectedEof { bit_position } => Self::TruncatedStream { bit_position },
            CoreError::Io(e) => Self::Io(e),
            CoreError::InvalidBitCount(count) => {
                Self::invalid_config(format!("bit field width {count} out of range"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_eof_maps_to_truncated() {
        let err: HuffmanError = CoreError::unexpected_eof(17).into();
        assert!(matches!(
            err,
            HuffmanError::TruncatedStream { bit_position: 17 }
        ));
    }

    #[test]
    fn test_error_display() {
        let err = HuffmanError::UnknownSymbol(Symbol::Byte(b'x'));
        assert!(err.to_string().contains("120"));

        let err = HuffmanError::malformed("stack underflow");
        assert!(err.to_string().contains("stack underflow"));

        let err = HuffmanError::InputTooLarge { len: 5 };
        assert!(err.to_string().contains("32-bit"));
    }
}
