//! Prefix codes derived from a Huffman tree.

use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;
use crate::tree::{HuffmanNode, HuffmanTree, MAX_LEAVES};
use oxihuff_core::FrequencyTable;
use std::fmt;
use std::str::FromStr;

/// The bit path from the root to one leaf: `false` is a left turn (bit 0),
/// `true` a right turn (bit 1).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Build a code from its bits.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// The bits, first to be written first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Code length in bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` for the zero-length code.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns `true` if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = HuffmanError;

    /// Parse a literal string of `0`/`1` characters.
    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(HuffmanError::malformed(format!(
                    "invalid character {other:?} in code {s:?}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }
}

/// Symbol-to-code mapping for every leaf of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Derive the code of every leaf by one depth-first walk.
    ///
    /// A tree that is a single leaf gets the one-bit code `0`, since an
    /// empty code can't be written to a bit stream.
    ///
    /// # Example
    ///
    /// ```
    /// use oxihuff_codec::{CodeTable, HuffmanTree, Symbol};
    /// use oxihuff_core::FrequencyTable;
    ///
    /// let freqs = FrequencyTable::from_bytes(b"AAAA");
    /// let tree = HuffmanTree::from_frequencies(&freqs, false).unwrap();
    /// let codes = CodeTable::from_tree(&tree);
    /// assert_eq!(codes.get(Symbol::Byte(b'A')).unwrap().to_string(), "0");
    /// ```
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; MAX_LEAVES];

        if let Some(symbol) = tree.node(tree.root()).symbol() {
            codes[symbol.index()] = Some(Code::from_bits(vec![false]));
            return Self { codes };
        }

        let mut stack = vec![(tree.root(), Vec::new())];
        while let Some((id, path)) = stack.pop() {
            match *tree.node(id) {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes[symbol.index()] = Some(Code::from_bits(path));
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((right, right_path));
                    stack.push((left, left_path));
                }
            }
        }

        Self { codes }
    }

    /// Code for `symbol`, if the tree has a leaf for it.
    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes[symbol.index()].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Returns `true` if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().enumerate().filter_map(|(value, code)| {
            let symbol = Symbol::from_value(value as u16)?;
            code.as_ref().map(|c| (symbol, c))
        })
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Number of payload bits needed to encode data with these counts.
    ///
    /// Bytes without a code contribute nothing. The result saturates at
    /// `u64::MAX`.
    pub fn encoded_bits(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .iter()
            .filter_map(|(byte, count)| {
                self.get(Symbol::Byte(byte))
                    .map(|code| count.saturating_mul(code.len() as u64))
            })
            .fold(0u64, u64::saturating_add)
    }

    /// Average code length in bits per input byte.
    pub fn average_len(&self, freqs: &FrequencyTable) -> f64 {
        let total = freqs.total();
        if total == 0 {
            return 0.0;
        }
        self.encoded_bits(freqs) as f64 / total as f64
    }

    /// Check that no code is a prefix of another.
    ///
    /// Codes taken from distinct leaves always pass; this exists to
    /// validate tables built by hand.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.iter().flatten().collect();
        sorted.sort();
        // In lexicographic order a prefix sorts directly before the codes
        // that extend it.
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }
}
