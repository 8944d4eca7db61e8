//! Huffman tree construction and inspection.
//!
//! Trees are stored as an arena: every node lives in one `Vec`, and
//! internal nodes refer to their children by [`NodeId`]. The tree owns the
//! arena and remembers only the root's id. Nothing mutates a tree after it
//! is built.
//!
//! # Tie-breaking
//!
//! The forest is a min-heap keyed by `(frequency, node id)`. Node ids are
//! handed out in creation order: byte leaves in ascending symbol order, then
//! the pseudo-EOF leaf, then each merged node. Among equal frequencies the
//! older node therefore leaves the heap first. The first node removed
//! becomes the left child, the second the right child. The resulting tree is
//! fully determined by the frequency table.

use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;
use oxihuff_core::FrequencyTable;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::debug;

/// Maximum number of leaves: 256 byte values plus the pseudo-EOF.
pub const MAX_LEAVES: usize = 257;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol and its weight.
    Leaf {
        /// Symbol decoded when this leaf is reached.
        symbol: Symbol,
        /// Occurrence count (zero for trees parsed from a description).
        frequency: u64,
    },
    /// A branch with exactly two children.
    Internal {
        /// Sum of the children's frequencies.
        frequency: u64,
        /// Child reached by a `0` bit.
        left: NodeId,
        /// Child reached by a `1` bit.
        right: NodeId,
    },
}

impl HuffmanNode {
    /// The node's weight.
    pub fn frequency(&self) -> u64 {
        match *self {
            HuffmanNode::Leaf { frequency, .. } | HuffmanNode::Internal { frequency, .. } => {
                frequency
            }
        }
    }

    /// The leaf symbol, if this is a leaf.
    pub fn symbol(&self) -> Option<Symbol> {
        match *self {
            HuffmanNode::Leaf { symbol, .. } => Some(symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    /// Returns `true` for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Node storage shared by the builder and the description parsers.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<HuffmanNode>,
}

impl Arena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: HuffmanNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub(crate) fn leaf(&mut self, symbol: Symbol, frequency: u64) -> NodeId {
        self.push(HuffmanNode::Leaf { symbol, frequency })
    }

    pub(crate) fn internal(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let frequency = self.frequency(left).saturating_add(self.frequency(right));
        self.push(HuffmanNode::Internal {
            frequency,
            left,
            right,
        })
    }

    pub(crate) fn frequency(&self, id: NodeId) -> u64 {
        self.nodes[id.index()].frequency()
    }

    pub(crate) fn finish(self, root: NodeId) -> HuffmanTree {
        HuffmanTree {
            nodes: self.nodes,
            root,
        }
    }
}

/// An immutable Huffman coding tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies.
    ///
    /// Symbols with a zero count are left out. With `pseudo_eof` set, a
    /// synthetic [`Symbol::PseudoEof`] leaf of frequency 1 joins the forest
    /// before merging.
    ///
    /// A single distinct symbol yields a tree whose root is that leaf.
    ///
    /// # Errors
    ///
    /// [`HuffmanError::EmptyAlphabet`] if there is nothing to build from.
    ///
    /// # Example
    ///
    /// ```
    /// use oxihuff_codec::{HuffmanTree, Symbol};
    /// use oxihuff_core::FrequencyTable;
    ///
    /// let freqs = FrequencyTable::from_bytes(b"abab");
    /// let tree = HuffmanTree::from_frequencies(&freqs, false).unwrap();
    /// assert_eq!(tree.leaf_count(), 2);
    /// assert_eq!(tree.frequency(), 4);
    /// assert!(tree.contains(Symbol::Byte(b'a')));
    /// ```
    pub fn from_frequencies(freqs: &FrequencyTable, pseudo_eof: bool) -> Result<Self> {
        let leaves = freqs.distinct() + usize::from(pseudo_eof);
        let mut arena = Arena::with_capacity((2 * leaves).saturating_sub(1));
        let mut forest = BinaryHeap::with_capacity(leaves);

        for (byte, count) in freqs.iter() {
            let id = arena.leaf(Symbol::Byte(byte), count);
            forest.push(Reverse((count, id)));
        }
        if pseudo_eof {
            let id = arena.leaf(Symbol::PseudoEof, 1);
            forest.push(Reverse((1, id)));
        }

        loop {
            let Reverse((_, first)) = forest.pop().ok_or(HuffmanError::EmptyAlphabet)?;
            let Some(Reverse((_, second))) = forest.pop() else {
                let tree = arena.finish(first);
                debug!(
                    leaves = tree.leaf_count(),
                    depth = tree.depth(),
                    weight = tree.frequency(),
                    "built Huffman tree"
                );
                return Ok(tree);
            };
            let parent = arena.internal(first, second);
            forest.push(Reverse((arena.frequency(parent), parent)));
        }
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id.index()]
    }

    /// Total number of nodes, leaves and internal.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Weight of the root, i.e. the number of symbols the tree was built
    /// from (zero for parsed trees).
    pub fn frequency(&self) -> u64 {
        self.node(self.root).frequency()
    }

    /// Returns `true` if some leaf holds `symbol`.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.nodes.iter().any(|n| n.symbol() == Some(symbol))
    }

    /// Every leaf with its depth, left to right.
    ///
    /// A lone root leaf has depth 0.
    pub fn leaves(&self) -> Vec<(Symbol, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match *self.node(id) {
                HuffmanNode::Leaf { symbol, .. } => out.push((symbol, depth)),
                HuffmanNode::Internal { left, right, .. } => {
                    // Right first so the left subtree is visited first
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        out
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.leaves().into_iter().map(|(_, d)| d).max().unwrap_or(0)
    }

    /// Compare structure and leaf symbols, ignoring frequencies.
    ///
    /// A tree rebuilt from a serialized description carries no weights, so
    /// this is the equality that serialization preserves.
    pub fn same_shape(&self, other: &HuffmanTree) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            match (self.node(a), other.node(b)) {
                (HuffmanNode::Leaf { symbol: x, .. }, HuffmanNode::Leaf { symbol: y, .. }) => {
                    if x != y {
                        return false;
                    }
                }
                (
                    HuffmanNode::Internal {
                        left: al,
                        right: ar,
                        ..
                    },
                    HuffmanNode::Internal {
                        left: bl,
                        right: br,
                        ..
                    },
                ) => {
                    stack.push((*al, *bl));
                    stack.push((*ar, *br));
                }
                _ => return false,
            }
        }
        true
    }
}
