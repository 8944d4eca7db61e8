//! Codec configuration for the two tree description formats.

use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;

/// How the tree travels alongside the encoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    /// 32-bit symbol count and post-order tree bits ahead of the payload,
    /// all in one bit stream.
    Preamble,
    /// Separate text of `symbol` / `code` line pairs; the payload ends with
    /// the pseudo-EOF code.
    Textual,
}

/// When the stream decoder stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoppingRule {
    /// Decode exactly this many symbols.
    ExplicitCount(u32),
    /// Decode until this symbol comes out; it is not emitted.
    Sentinel(Symbol),
}

/// Huffman codec configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Where the tree description goes.
    pub format: TreeFormat,
    /// Whether the tree carries a pseudo-EOF leaf.
    /// Required by the textual format, impossible in the preamble format
    /// (leaf values there are 8 bits wide).
    pub pseudo_eof: bool,
}

impl HuffmanConfig {
    /// Single self-describing bit stream.
    ///
    /// - 32-bit MSB-first symbol count
    /// - Post-order tree description, 8-bit leaf values
    /// - Payload decoded by count, no pseudo-EOF
    pub const EMBEDDED: Self = Self {
        format: TreeFormat::Preamble,
        pseudo_eof: false,
    };

    /// Text code file plus binary payload.
    ///
    /// - Decimal symbol / binary code line pairs
    /// - Payload terminated by the pseudo-EOF (symbol 256)
    pub const TEXTUAL: Self = Self {
        format: TreeFormat::Textual,
        pseudo_eof: true,
    };

    /// Create the standard configuration for a format.
    pub fn new(format: TreeFormat) -> Self {
        match format {
            TreeFormat::Preamble => Self::EMBEDDED,
            TreeFormat::Textual => Self::TEXTUAL,
        }
    }

    /// Reject combinations the wire formats can't express.
    pub fn validate(&self) -> Result<()> {
        match (self.format, self.pseudo_eof) {
            (TreeFormat::Preamble, true) => Err(HuffmanError::invalid_config(
                "the preamble format has no room for a pseudo-EOF leaf",
            )),
            (TreeFormat::Textual, false) => Err(HuffmanError::invalid_config(
                "the textual format needs a pseudo-EOF to terminate the payload",
            )),
            _ => Ok(()),
        }
    }

    /// Stopping rule for a payload of `count` symbols.
    pub fn stopping_rule(&self, count: u32) -> StoppingRule {
        if self.pseudo_eof {
            StoppingRule::Sentinel(Symbol::PseudoEof)
        } else {
            StoppingRule::ExplicitCount(count)
        }
    }
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self::EMBEDDED
    }
}
