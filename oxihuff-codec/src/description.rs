//! Textual tree description.
//!
//! The description is a list of line pairs, one pair per leaf:
//!
//! ```text
//! 97        <- decimal symbol value (256 is the pseudo-EOF)
//! 0         <- its code as literal 0/1 characters
//! 98
//! 10
//! 256
//! 11
//! ```
//!
//! Pair order carries no meaning. A reader rebuilds the tree by walking each
//! code from the root, creating branches as needed and placing the leaf at
//! the end of the walk.

use crate::code::{Code, CodeTable};
use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;
use crate::tree::{Arena, HuffmanTree, MAX_LEAVES, NodeId};
use std::fmt::Write as _;
use std::io::Write;
use tracing::debug;

/// Render the description of `tree`, leaves in left-to-right order.
///
/// # Example
///
/// ```
/// use oxihuff_codec::{HuffmanTree, description};
/// use oxihuff_core::FrequencyTable;
///
/// let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"ab"), false).unwrap();
/// assert_eq!(description::describe(&tree), "97\n0\n98\n1\n");
/// ```
pub fn describe(tree: &HuffmanTree) -> String {
    let codes = CodeTable::from_tree(tree);
    let mut out = String::new();
    for (symbol, _) in tree.leaves() {
        if let Some(code) = codes.get(symbol) {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{symbol}\n{code}");
        }
    }
    out
}

/// Write the description of `tree` to `writer`.
pub fn write_description<W: Write>(tree: &HuffmanTree, writer: &mut W) -> Result<()> {
    let text = describe(tree);
    writer.write_all(text.as_bytes())?;
    debug!(bytes = text.len(), "wrote tree description");
    Ok(())
}

/// A node of the partially built tree.
#[derive(Debug, Clone, Default)]
struct Slot {
    children: [Option<usize>; 2],
    symbol: Option<Symbol>,
}

/// Rebuild a tree from its textual description.
///
/// Leaves of the rebuilt tree have zero frequency.
///
/// # Errors
///
/// - [`HuffmanError::EmptyAlphabet`] if there are no entries
/// - [`HuffmanError::MalformedDescription`] for anything that does not
///   describe exactly one complete prefix code tree
pub fn parse_description(text: &str) -> Result<HuffmanTree> {
    let mut lines: Vec<&str> = text.lines().map(str::trim).collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(HuffmanError::EmptyAlphabet);
    }
    if lines.len() % 2 != 0 {
        return Err(HuffmanError::malformed(format!(
            "line {} has a symbol but no code",
            lines.len()
        )));
    }

    let mut slots = vec![Slot::default()];
    let mut seen = [false; MAX_LEAVES];
    let mut lone_code_len = 0;

    for (pair, entry) in lines.chunks_exact(2).enumerate() {
        let line_no = pair * 2 + 1;
        let symbol = Some(entry[0])
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<u16>().ok())
            .and_then(Symbol::from_value)
            .ok_or_else(|| {
                HuffmanError::malformed(format!("line {line_no}: invalid symbol {:?}", entry[0]))
            })?;
        let code: Code = entry[1].parse()?;
        if code.is_empty() {
            return Err(HuffmanError::malformed(format!(
                "line {}: empty code for symbol {symbol}",
                line_no + 1
            )));
        }
        if seen[symbol.index()] {
            return Err(HuffmanError::malformed(format!(
                "line {line_no}: symbol {symbol} listed twice"
            )));
        }
        seen[symbol.index()] = true;
        lone_code_len = code.len();

        insert(&mut slots, symbol, &code)
            .map_err(|msg| HuffmanError::malformed(format!("line {}: {msg}", line_no + 1)))?;
    }

    let entries = lines.len() / 2;
    debug!(entries, "parsed tree description");

    // A lone leaf is written with a one-bit code; it is the whole tree.
    if entries == 1 && lone_code_len == 1 {
        let leaf = slots.iter().find_map(|s| s.symbol);
        if let Some(symbol) = leaf {
            let mut arena = Arena::with_capacity(1);
            let root = arena.leaf(symbol, 0);
            return Ok(arena.finish(root));
        }
    }

    build(&slots)
}

/// Walk `code` from the root, creating branches, and place `symbol` at the
/// end.
fn insert(slots: &mut Vec<Slot>, symbol: Symbol, code: &Code) -> std::result::Result<(), String> {
    let mut node = 0;
    for &bit in code.bits() {
        if slots[node].symbol.is_some() {
            return Err(format!("code {code} passes through another leaf"));
        }
        let branch = usize::from(bit);
        node = match slots[node].children[branch] {
            Some(child) => child,
            None => {
                slots.push(Slot::default());
                let child = slots.len() - 1;
                slots[node].children[branch] = Some(child);
                child
            }
        };
    }

    let slot = &mut slots[node];
    if slot.symbol.is_some() || slot.children.iter().any(Option::is_some) {
        return Err(format!("code {code} collides with another code"));
    }
    slot.symbol = Some(symbol);
    Ok(())
}

/// Convert the slot trie into an arena tree, checking every branch is full.
fn build(slots: &[Slot]) -> Result<HuffmanTree> {
    let mut arena = Arena::with_capacity(slots.len());
    let mut ids: Vec<Option<NodeId>> = vec![None; slots.len()];
    let mut stack = vec![(0usize, false)];

    while let Some((idx, expanded)) = stack.pop() {
        let slot = &slots[idx];
        if let Some(symbol) = slot.symbol {
            ids[idx] = Some(arena.leaf(symbol, 0));
            continue;
        }
        let [Some(left), Some(right)] = slot.children else {
            return Err(HuffmanError::malformed(
                "incomplete tree: a branch is missing a child",
            ));
        };
        if expanded {
            let (Some(l), Some(r)) = (ids[left], ids[right]) else {
                return Err(HuffmanError::malformed("branch children were not built"));
            };
            ids[idx] = Some(arena.internal(l, r));
        } else {
            stack.push((idx, true));
            stack.push((right, false));
            stack.push((left, false));
        }
    }

    let root = ids[0].ok_or_else(|| HuffmanError::malformed("no root"))?;
    Ok(arena.finish(root))
}
