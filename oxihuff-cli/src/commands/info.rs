//! Info command implementation.

use oxihuff_codec::CodeTable;
use oxihuff_codec::preamble::read_preamble;
use oxihuff_core::BitReader;
use serde::Serialize;
use std::path::PathBuf;

/// JSON output for an embedded-format file.
#[derive(Debug, Serialize)]
struct InfoJson {
    file: String,
    size: u64,
    symbol_count: u32,
    leaves: usize,
    tree_depth: usize,
    max_code_len: usize,
    preamble_bits: u64,
    payload_bits: u64,
}

pub fn cmd_info(file: &PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    let mut reader = BitReader::new(data.as_slice());
    let preamble = read_preamble(&mut reader)?;

    let (leaves, depth, max_code_len) = match &preamble.tree {
        Some(tree) => (
            tree.leaf_count(),
            tree.depth(),
            CodeTable::from_tree(tree).max_len(),
        ),
        None => (0, 0, 0),
    };
    // Everything after the preamble, pad bits included
    let payload_bits = (data.len() as u64 * 8).saturating_sub(preamble.bits);

    if json {
        let info = InfoJson {
            file: file.display().to_string(),
            size: data.len() as u64,
            symbol_count: preamble.count,
            leaves,
            tree_depth: depth,
            max_code_len,
            preamble_bits: preamble.bits,
            payload_bits,
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Huffman File Information");
    println!("========================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", data.len());
    println!("Symbols: {}", preamble.count);
    println!();
    println!("Tree:");
    println!("  Leaves: {}", leaves);
    println!("  Depth: {}", depth);
    println!("  Longest code: {} bits", max_code_len);
    println!();
    println!("Layout:");
    println!("  Preamble: {} bits", preamble.bits);
    println!("  Payload: {} bits (with padding)", payload_bits);
    if preamble.count > 0 {
        println!(
            "  Average: {:.3} bits/symbol",
            payload_bits as f64 / f64::from(preamble.count)
        );
    }

    Ok(())
}
