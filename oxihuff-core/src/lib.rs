//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman codec.
//!
//! This crate provides the collaborators the codec is built on:
//!
//! - [`bitstream`]: MSB-first bit-level I/O over byte streams
//! - [`traits`]: The `BitSource`/`BitSink` bit channel traits
//! - [`frequency`]: Byte frequency tables
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Surface                                             │
//! │     oxihuff CLI                                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Tree builder, code table, tree codecs, stream coder │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Bit channel (this crate)                            │
//! │     BitReader/BitWriter, FrequencyTable                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::BitReader;
//! use oxihuff_core::FrequencyTable;
//!
//! // Read bits from data
//! let data = vec![0xAB, 0xCD];
//! let mut reader = BitReader::new(data.as_slice());
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//!
//! // Count byte frequencies
//! let freqs = FrequencyTable::from_bytes(b"Hello, World!");
//! assert_eq!(freqs.get(b'l'), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod frequency;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{CoreError, Result};
pub use frequency::{BYTE_SYMBOLS, FrequencyTable};
pub use traits::{BitSink, BitSource};
