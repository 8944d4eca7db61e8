//! # OxiHuff Codec: Pure Rust Huffman Coding
//!
//! Static Huffman compression and decompression of byte streams, with two
//! ways of shipping the tree to the decoder.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Deterministic**: Ties between equal weights are broken by creation
//!   order, so the same input always gives the same bits
//! - **Embedded format**: One self-describing bit stream
//! - **Textual format**: Human-readable code file plus binary payload
//!
//! ## Embedded Format
//!
//! - **MSB-first bit order** throughout
//! - **32-bit symbol count**: The decoder stops after exactly this many symbols
//! - **Post-order tree**: `1` + 8-bit value per leaf, `0` per internal node,
//!   then a closing `0`
//! - **Payload**: Codes concatenated with no delimiters, zero padded
//!
//! ## Textual Format
//!
//! - **Code file**: Line pairs of decimal symbol and `0`/`1` code
//! - **Pseudo-EOF**: Symbol 256 terminates the payload
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::{compress_embedded, decompress_embedded};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! // Compress
//! let compressed = compress_embedded(original).unwrap();
//!
//! // Decompress
//! let decompressed = decompress_embedded(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! The textual format keeps the tree apart from the payload:
//!
//! ```rust
//! use oxihuff_codec::{compress_textual, decompress_textual};
//!
//! let compressed = compress_textual(b"abracadabra").unwrap();
//! let description = compressed.description.as_deref().unwrap();
//! assert!(description.contains("256\n"));
//!
//! let decompressed = decompress_textual(description, &compressed.payload).unwrap();
//! assert_eq!(decompressed, b"abracadabra");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code;
pub mod config;
pub mod decoder;
pub mod description;
pub mod encoder;
pub mod error;
pub mod preamble;
pub mod symbol;
pub mod tree;

pub use code::{Code, CodeTable};
pub use config::{HuffmanConfig, StoppingRule, TreeFormat};
pub use decoder::{HuffmanDecoder, StreamDecoder};
pub use encoder::{Compressed, HuffmanEncoder, StreamEncoder};
pub use error::{HuffmanError, Result};
pub use preamble::Preamble;
pub use symbol::{PSEUDO_EOF_VALUE, Symbol};
pub use tree::{HuffmanNode, HuffmanTree, NodeId};

/// Compress data using the given configuration.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{compress, HuffmanConfig};
///
/// let data = b"aaaaaaaabbbbccd";
/// let compressed = compress(data, HuffmanConfig::TEXTUAL).unwrap();
/// assert!(compressed.description.is_some());
/// assert!(compressed.payload.len() < data.len());
/// ```
pub fn compress(data: &[u8], config: HuffmanConfig) -> Result<Compressed> {
    let encoder = HuffmanEncoder::new(config)?;
    encoder.encode(data)
}

/// Decompress data produced by [`compress`] with the same configuration.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{compress, decompress, HuffmanConfig};
///
/// let original = b"Hello, World!";
/// let compressed = compress(original, HuffmanConfig::EMBEDDED).unwrap();
/// let decompressed = decompress(&compressed, HuffmanConfig::EMBEDDED).unwrap();
/// assert_eq!(decompressed, original);
/// ```
pub fn decompress(compressed: &Compressed, config: HuffmanConfig) -> Result<Vec<u8>> {
    let decoder = HuffmanDecoder::new(config)?;
    decoder.decode(compressed)
}

/// Compress data into a single self-describing stream (convenience function).
///
/// This is equivalent to `compress(data, HuffmanConfig::EMBEDDED)` keeping
/// only the payload.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::compress_embedded;
///
/// // Empty input is just the zero count
/// assert_eq!(compress_embedded(b"").unwrap(), vec![0, 0, 0, 0]);
/// ```
pub fn compress_embedded(data: &[u8]) -> Result<Vec<u8>> {
    Ok(compress(data, HuffmanConfig::EMBEDDED)?.payload)
}

/// Decompress a self-describing stream (convenience function).
pub fn decompress_embedded(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::new(HuffmanConfig::EMBEDDED)?.decode_parts(None, data)
}

/// Compress data into a code description and payload (convenience function).
///
/// This is equivalent to `compress(data, HuffmanConfig::TEXTUAL)`.
pub fn compress_textual(data: &[u8]) -> Result<Compressed> {
    compress(data, HuffmanConfig::TEXTUAL)
}

/// Decompress a payload using its code description (convenience function).
pub fn decompress_textual(description: &str, payload: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::new(HuffmanConfig::TEXTUAL)?.decode_parts(Some(description), payload)
}
