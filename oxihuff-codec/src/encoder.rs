//! Huffman encoder (compression).

use crate::code::CodeTable;
use crate::config::{HuffmanConfig, TreeFormat};
use crate::description::describe;
use crate::error::{HuffmanError, Result};
use crate::preamble::write_preamble;
use crate::symbol::Symbol;
use crate::tree::HuffmanTree;
use oxihuff_core::{BitSink, BitWriter, FrequencyTable};
use tracing::debug;

/// Output of one compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    /// Textual tree description; `None` when the tree is embedded in the
    /// payload.
    pub description: Option<String>,
    /// Encoded bit stream, zero padded to a whole byte.
    pub payload: Vec<u8>,
}

/// Replaces symbols by their codes.
#[derive(Debug, Clone, Copy)]
pub struct StreamEncoder<'a> {
    table: &'a CodeTable,
}

impl<'a> StreamEncoder<'a> {
    /// Create an encoder over a code table.
    pub fn new(table: &'a CodeTable) -> Self {
        Self { table }
    }

    /// Append the code of `symbol`.
    ///
    /// # Errors
    ///
    /// [`HuffmanError::UnknownSymbol`] if the table has no code for it.
    /// Tables derived from the data being encoded never hit this.
    pub fn encode_symbol<S: BitSink>(&self, symbol: Symbol, sink: &mut S) -> Result<()> {
        let code = self
            .table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol(symbol))?;
        for &bit in code.bits() {
            sink.write_bit(bit)?;
        }
        Ok(())
    }

    /// Append the codes of every byte of `data`, in order.
    ///
    /// Returns the number of bits written.
    pub fn encode<S: BitSink>(&self, data: &[u8], sink: &mut S) -> Result<u64> {
        let start = sink.bits_written();
        for &byte in data {
            self.encode_symbol(Symbol::Byte(byte), sink)?;
        }
        Ok(sink.bits_written() - start)
    }
}

/// Huffman encoder for compression.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    config: HuffmanConfig,
}

impl HuffmanEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    /// Compress `data`.
    ///
    /// # Pipeline
    ///
    /// 1. Count byte frequencies
    /// 2. Build the tree (with a pseudo-EOF leaf for the textual format)
    /// 3. Derive the code table
    /// 4. Write the tree description (preamble bits or text)
    /// 5. Write the code of every byte, then the pseudo-EOF code if used
    /// 6. Zero pad the last byte
    ///
    /// # Errors
    ///
    /// [`HuffmanError::InputTooLarge`] if the embedded format can't count
    /// `data` in 32 bits.
    pub fn encode(&self, data: &[u8]) -> Result<Compressed> {
        match self.config.format {
            TreeFormat::Preamble => self.encode_embedded(data),
            TreeFormat::Textual => self.encode_textual(data),
        }
    }

    fn encode_embedded(&self, data: &[u8]) -> Result<Compressed> {
        let count = u32::try_from(data.len())
            .map_err(|_| HuffmanError::InputTooLarge { len: data.len() })?;
        let mut writer = BitWriter::new(Vec::with_capacity(data.len() / 2 + 64));

        if data.is_empty() {
            write_preamble(&mut writer, 0, None)?;
        } else {
            let freqs = FrequencyTable::from_bytes(data);
            let tree = HuffmanTree::from_frequencies(&freqs, self.config.pseudo_eof)?;
            let table = CodeTable::from_tree(&tree);
            write_preamble(&mut writer, count, Some(&tree))?;
            let bits = StreamEncoder::new(&table).encode(data, &mut writer)?;
            debug!(symbols = count, bits, "encoded payload");
        }

        let payload = writer.into_inner()?;
        Ok(Compressed {
            description: None,
            payload,
        })
    }

    fn encode_textual(&self, data: &[u8]) -> Result<Compressed> {
        let freqs = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&freqs, true)?;
        let table = CodeTable::from_tree(&tree);

        let mut writer = BitWriter::new(Vec::with_capacity(data.len() / 2 + 1));
        let encoder = StreamEncoder::new(&table);
        encoder.encode(data, &mut writer)?;
        encoder.encode_symbol(Symbol::PseudoEof, &mut writer)?;
        debug!(
            symbols = data.len(),
            bits = writer.bits_written(),
            "encoded payload"
        );

        let payload = writer.into_inner()?;
        Ok(Compressed {
            description: Some(describe(&tree)),
            payload,
        })
    }
}
