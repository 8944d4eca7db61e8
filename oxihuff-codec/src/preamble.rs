//! Embedded bit preamble: symbol count plus post-order tree description.
//!
//! # Layout
//!
//! All fields are MSB-first and packed with no alignment:
//!
//! ```text
//! +----------------+--------------------------------+---+---------------+
//! | count (32 bit) | post-order tree                | 0 | payload ...   |
//! +----------------+--------------------------------+---+---------------+
//!                    leaf:     1 vvvvvvvv (8-bit value)
//!                    internal: 0 (after both children)
//! ```
//!
//! The trailing `0` marks the end of the description. A reader tells it
//! apart from an internal-node `0` by the size of its stack: an internal
//! node needs two finished subtrees, the end marker comes when only the
//! root is left.
//!
//! When the count is zero the tree is omitted entirely.

use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;
use crate::tree::{Arena, HuffmanNode, HuffmanTree};
use oxihuff_core::{BitSink, BitSource};
use tracing::{debug, trace};

/// Width of the symbol count field.
pub const COUNT_BITS: u8 = 32;

/// Width of a leaf value.
pub const LEAF_VALUE_BITS: u8 = 8;

/// A parsed preamble.
#[derive(Debug, Clone)]
pub struct Preamble {
    /// Number of symbols in the payload.
    pub count: u32,
    /// Decoding tree; `None` when `count` is zero.
    pub tree: Option<HuffmanTree>,
    /// Bits the preamble occupied.
    pub bits: u64,
}

/// Write the count and, for a non-empty payload, the tree.
///
/// Returns the number of bits written.
pub fn write_preamble<S: BitSink>(
    sink: &mut S,
    count: u32,
    tree: Option<&HuffmanTree>,
) -> Result<u64> {
    let start = sink.bits_written();
    sink.write_bits(count, COUNT_BITS)?;
    if count > 0 {
        let tree = tree.ok_or_else(|| {
            HuffmanError::invalid_config("a non-empty payload needs a tree in its preamble")
        })?;
        write_tree(tree, sink)?;
    }
    let bits = sink.bits_written() - start;
    debug!(count, bits, "wrote preamble");
    Ok(bits)
}

/// Read a preamble written by [`write_preamble`].
pub fn read_preamble<S: BitSource>(source: &mut S) -> Result<Preamble> {
    let start = source.bit_position();
    let count = source.read_bits(COUNT_BITS)?;
    let tree = if count > 0 {
        Some(read_tree(source)?)
    } else {
        None
    };
    let bits = source.bit_position() - start;
    debug!(count, bits, "read preamble");
    Ok(Preamble { count, tree, bits })
}

/// Emit the post-order description of `tree` followed by the end marker.
///
/// # Errors
///
/// [`HuffmanError::InvalidConfig`] if the tree has a pseudo-EOF leaf,
/// which has no 8-bit representation.
pub fn write_tree<S: BitSink>(tree: &HuffmanTree, sink: &mut S) -> Result<()> {
    // (node, children already emitted)
    let mut stack = vec![(tree.root(), false)];
    while let Some((id, expanded)) = stack.pop() {
        match *tree.node(id) {
            HuffmanNode::Leaf {
                symbol: Symbol::Byte(value),
                ..
            } => {
                sink.write_bit(true)?;
                sink.write_bits(u32::from(value), LEAF_VALUE_BITS)?;
            }
            HuffmanNode::Leaf {
                symbol: Symbol::PseudoEof,
                ..
            } => {
                return Err(HuffmanError::invalid_config(
                    "pseudo-EOF leaf cannot be written to a preamble",
                ));
            }
            HuffmanNode::Internal { .. } if expanded => sink.write_bit(false)?,
            HuffmanNode::Internal { left, right, .. } => {
                stack.push((id, true));
                stack.push((right, false));
                stack.push((left, false));
            }
        }
    }
    // End of description
    sink.write_bit(false)?;
    Ok(())
}

/// Rebuild a tree from its post-order description.
///
/// Consumes bits up to and including the end marker and nothing more.
pub fn read_tree<S: BitSource>(source: &mut S) -> Result<HuffmanTree> {
    let mut arena = Arena::with_capacity(511);
    let mut stack = Vec::new();
    let mut seen = [false; 256];

    loop {
        if source.read_bit()? {
            let value = source.read_bits(LEAF_VALUE_BITS)? as u8;
            if seen[value as usize] {
                return Err(HuffmanError::malformed(format!(
                    "leaf {value} appears twice (bit {})",
                    source.bit_position()
                )));
            }
            seen[value as usize] = true;
            trace!(value, "preamble leaf");
            stack.push(arena.leaf(Symbol::Byte(value), 0));
            continue;
        }

        match (stack.pop(), stack.pop()) {
            (Some(right), Some(left)) => stack.push(arena.internal(left, right)),
            // Only the root is left: this 0 is the end marker
            (Some(root), None) => return Ok(arena.finish(root)),
            (None, _) => {
                return Err(HuffmanError::malformed(format!(
                    "end marker before any leaf (bit {})",
                    source.bit_position()
                )));
            }
        }
    }
}
