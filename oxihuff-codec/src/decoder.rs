//! Huffman decoder (decompression).
//!
//! Decoding stops by one of two rules: after the symbol count declared in
//! the preamble, or when the pseudo-EOF comes out of the tree. Either way
//! the decoder never reads past the last meaningful bit, so pad bits at the
//! end of the payload are ignored.

use crate::config::{HuffmanConfig, StoppingRule, TreeFormat};
use crate::description::parse_description;
use crate::encoder::Compressed;
use crate::error::{HuffmanError, Result};
use crate::preamble::read_preamble;
use crate::symbol::Symbol;
use crate::tree::{HuffmanNode, HuffmanTree};
use oxihuff_core::{BitReader, BitSource};
use tracing::debug;

/// Upper bound on the up-front output allocation; a corrupt count must not
/// reserve gigabytes before the first bit is read.
const MAX_PREALLOC: usize = 1 << 20;

/// Walks the tree bit by bit to turn codes back into symbols.
#[derive(Debug, Clone, Copy)]
pub struct StreamDecoder<'a> {
    tree: &'a HuffmanTree,
    rule: StoppingRule,
}

impl<'a> StreamDecoder<'a> {
    /// Create a decoder over `tree` with the given stopping rule.
    ///
    /// # Errors
    ///
    /// [`HuffmanError::MalformedDescription`] if the rule waits for a
    /// sentinel the tree has no leaf for; decoding could never stop.
    pub fn new(tree: &'a HuffmanTree, rule: StoppingRule) -> Result<Self> {
        match rule {
            StoppingRule::Sentinel(sentinel) if !tree.contains(sentinel) => {
                Err(HuffmanError::malformed(format!(
                    "tree has no leaf for the end marker {sentinel}"
                )))
            }
            _ => Ok(Self { tree, rule }),
        }
    }

    /// Read one code and return its symbol.
    ///
    /// A tree that is a single leaf still consumes one bit per symbol, the
    /// value of which is ignored.
    pub fn decode_symbol<S: BitSource>(&self, source: &mut S) -> Result<Symbol> {
        let mut id = self.tree.root();
        if let HuffmanNode::Leaf { symbol, .. } = *self.tree.node(id) {
            source.read_bit()?;
            return Ok(symbol);
        }
        loop {
            match *self.tree.node(id) {
                HuffmanNode::Leaf { symbol, .. } => return Ok(symbol),
                HuffmanNode::Internal { left, right, .. } => {
                    id = if source.read_bit()? { right } else { left };
                }
            }
        }
    }

    /// Decode symbols until the stopping rule is satisfied.
    ///
    /// # Errors
    ///
    /// - [`HuffmanError::TruncatedStream`] if the bits run out first; no
    ///   partial output is returned
    /// - [`HuffmanError::MalformedDescription`] if the pseudo-EOF shows up
    ///   where it can't be a terminator
    pub fn decode<S: BitSource>(&self, source: &mut S) -> Result<Vec<u8>> {
        let start = source.bit_position();
        let output = match self.rule {
            StoppingRule::ExplicitCount(count) => {
                let mut output = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
                for _ in 0..count {
                    match self.decode_symbol(source)? {
                        Symbol::Byte(byte) => output.push(byte),
                        Symbol::PseudoEof => {
                            return Err(HuffmanError::malformed(
                                "pseudo-EOF decoded from a counted stream",
                            ));
                        }
                    }
                }
                output
            }
            StoppingRule::Sentinel(sentinel) => {
                let mut output = Vec::new();
                loop {
                    let symbol = self.decode_symbol(source)?;
                    if symbol == sentinel {
                        break;
                    }
                    match symbol {
                        Symbol::Byte(byte) => output.push(byte),
                        Symbol::PseudoEof => {
                            return Err(HuffmanError::malformed(
                                "pseudo-EOF decoded before the end marker",
                            ));
                        }
                    }
                }
                output
            }
        };
        debug!(
            symbols = output.len(),
            bits = source.bit_position() - start,
            "decoded payload"
        );
        Ok(output)
    }
}

/// Huffman decoder for decompression.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder {
    config: HuffmanConfig,
}

impl HuffmanDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    /// Decompress the output of the matching encoder.
    pub fn decode(&self, compressed: &Compressed) -> Result<Vec<u8>> {
        self.decode_parts(compressed.description.as_deref(), &compressed.payload)
    }

    /// Decompress from a description and payload held separately.
    ///
    /// The embedded format ignores `description`; the textual format
    /// requires it.
    pub fn decode_parts(&self, description: Option<&str>, payload: &[u8]) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(payload);
        match self.config.format {
            TreeFormat::Preamble => {
                let preamble = read_preamble(&mut reader)?;
                match preamble.tree {
                    Some(tree) => {
                        let rule = self.config.stopping_rule(preamble.count);
                        StreamDecoder::new(&tree, rule)?.decode(&mut reader)
                    }
                    None => Ok(Vec::new()),
                }
            }
            TreeFormat::Textual => {
                let description = description.ok_or_else(|| {
                    HuffmanError::malformed("textual format needs a tree description")
                })?;
                let tree = parse_description(description)?;
                let rule = self.config.stopping_rule(0);
                StreamDecoder::new(&tree, rule)?.decode(&mut reader)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeTable;
    use crate::encoder::{HuffmanEncoder, StreamEncoder};
    use oxihuff_core::{BitWriter, FrequencyTable};

    fn tree_for(data: &[u8], pseudo_eof: bool) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data), pseudo_eof).unwrap()
    }

    #[test]
    fn test_decode_symbol_walks_tree() {
        // c = 0, a = 10, b = 11
        let tree = tree_for(b"abc", false);
        let decoder = StreamDecoder::new(&tree, StoppingRule::ExplicitCount(3)).unwrap();
        let bits = [0b0101_1000u8];
        let out = decoder.decode(&mut BitReader::new(&bits[..])).unwrap();
        assert_eq!(out, b"cab");
    }

    #[test]
    fn test_single_leaf_ignores_bit_value() {
        let tree = tree_for(b"A", false);
        let decoder = StreamDecoder::new(&tree, StoppingRule::ExplicitCount(8)).unwrap();
        let bits = [0b1011_0010u8];
        let out = decoder.decode(&mut BitReader::new(&bits[..])).unwrap();
        assert_eq!(out, b"AAAAAAAA");
    }

    #[test]
    fn test_count_honored_with_trailing_bits() {
        let tree = tree_for(b"abc", false);
        let decoder = StreamDecoder::new(&tree, StoppingRule::ExplicitCount(2)).unwrap();
        // c a, then leftover bits that would decode further
        let bits = [0b0101_0101u8, 0xFF];
        let mut reader = BitReader::new(&bits[..]);
        assert_eq!(decoder.decode(&mut reader).unwrap(), b"ca");
        assert_eq!(reader.bits_read(), 3);
    }

    #[test]
    fn test_truncated_count() {
        let tree = tree_for(b"abc", false);
        let decoder = StreamDecoder::new(&tree, StoppingRule::ExplicitCount(9)).unwrap();
        let bits = [0u8];
        let err = decoder.decode(&mut BitReader::new(&bits[..])).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::TruncatedStream { bit_position: 8 }
        ));
    }

    #[test]
    fn test_sentinel_stops_and_is_not_emitted() {
        let data = b"hello";
        let tree = tree_for(data, true);
        let table = CodeTable::from_tree(&tree);
        let mut writer = BitWriter::new(Vec::new());
        let encoder = StreamEncoder::new(&table);
        encoder.encode(data, &mut writer).unwrap();
        encoder.encode_symbol(Symbol::PseudoEof, &mut writer).unwrap();
        // Garbage after the terminator
        encoder.encode(b"lll", &mut writer).unwrap();
        let bytes = writer.into_inner().unwrap();

        let decoder =
            StreamDecoder::new(&tree, StoppingRule::Sentinel(Symbol::PseudoEof)).unwrap();
        let out = decoder.decode(&mut BitReader::new(bytes.as_slice())).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_sentinel_missing_from_tree() {
        let tree = tree_for(b"abc", false);
        let err = StreamDecoder::new(&tree, StoppingRule::Sentinel(Symbol::PseudoEof)).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedDescription { .. }));
    }

    #[test]
    fn test_pseudo_eof_under_count() {
        // Lone pseudo-EOF leaf
        let tree = tree_for(b"", true);
        let decoder = StreamDecoder::new(&tree, StoppingRule::ExplicitCount(1)).unwrap();
        let bits = [0u8];
        let err = decoder.decode(&mut BitReader::new(&bits[..])).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedDescription { .. }));
    }

    #[test]
    fn test_textual_needs_description() {
        let decoder = HuffmanDecoder::new(HuffmanConfig::TEXTUAL).unwrap();
        let err = decoder.decode_parts(None, &[0]).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedDescription { .. }));
    }

    #[test]
    fn test_decoder_roundtrip_both_formats() {
        let data = b"mississippi river";
        for config in [HuffmanConfig::EMBEDDED, HuffmanConfig::TEXTUAL] {
            let compressed = HuffmanEncoder::new(config).unwrap().encode(data).unwrap();
            let decoded = HuffmanDecoder::new(config)
                .unwrap()
                .decode(&compressed)
                .unwrap();
            assert_eq!(decoded, data);
        }
    }

    #[test]
    fn test_empty_embedded_reads_only_count() {
        let decoder = HuffmanDecoder::new(HuffmanConfig::EMBEDDED).unwrap();
        assert!(decoder.decode_parts(None, &[0, 0, 0, 0]).unwrap().is_empty());
        // Anything after a zero count is never looked at
        assert!(decoder.decode_parts(None, &[0, 0, 0, 0, 0xFF]).unwrap().is_empty());
    }
}
