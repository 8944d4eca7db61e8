//! Error types for the OxiHuff bit channel and frequency scanning.
//!
//! Codec-level failures (malformed tree descriptions, unknown symbols and
//! so on) live in `oxihuff-codec`; this crate only reports what can go wrong
//! while moving bits in and out of a byte stream.

use std::io;
use thiserror::Error;

/// The error type for core bit-level operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The underlying byte stream ended before the requested bits were available.
    #[error("Unexpected end of bit stream at bit position {bit_position}")]
    UnexpectedEof {
        /// Number of bits successfully consumed before the stream ran dry.
        bit_position: u64,
    },

    /// A fixed-width read or write asked for an unsupported number of bits.
    #[error("Invalid bit count: {0} (must be 1-32)")]
    InvalidBitCount(u8),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create an unexpected end-of-stream error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Returns `true` if this error means the input ran out of bits.
    pub fn is_eof(&self) -> bool {
        match self {
            Self::UnexpectedEof { .. } => true,
            Self::Io(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            Self::InvalidBitCount(_) => false,
        }
    }
}
