//! Codes command implementation.

use super::compress::OutputFormat;
use crate::utils::symbol_label;
use oxihuff_codec::{Code, CodeTable, HuffmanTree, Symbol};
use oxihuff_core::FrequencyTable;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// JSON serializable code table entry.
#[derive(Debug, Serialize)]
struct CodeJson {
    symbol: u16,
    label: String,
    count: u64,
    code: String,
}

/// JSON output for a code table.
#[derive(Debug, Serialize)]
struct CodesJson {
    file: String,
    size: u64,
    distinct: usize,
    average_bits: f64,
    payload_bits: u64,
    codes: Vec<CodeJson>,
}

/// Payload bits and average bits per encoded symbol, counting the
/// pseudo-EOF code once when the table has one.
fn payload_stats(table: &CodeTable, freqs: &FrequencyTable) -> (u64, f64) {
    let eof_bits = table.get(Symbol::PseudoEof).map_or(0, Code::len) as u64;
    let symbols = freqs.total().saturating_add(u64::from(eof_bits > 0));
    let bits = table.encoded_bits(freqs).saturating_add(eof_bits);
    if symbols == 0 {
        return (bits, 0.0);
    }
    (bits, bits as f64 / symbols as f64)
}

pub fn cmd_codes(
    file: &PathBuf,
    format: OutputFormat,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let freqs = FrequencyTable::from_reader(BufReader::new(File::open(file)?))?;
    let config = format.config();

    if freqs.is_empty() && !config.pseudo_eof {
        println!("{}: empty file, no codes", file.display());
        return Ok(());
    }

    let tree = HuffmanTree::from_frequencies(&freqs, config.pseudo_eof)?;
    let table = CodeTable::from_tree(&tree);
    let (payload_bits, average_bits) = payload_stats(&table, &freqs);
    let count_of = |symbol: Symbol| match symbol {
        Symbol::Byte(b) => freqs.get(b),
        Symbol::PseudoEof => 1,
    };

    if json {
        let output = CodesJson {
            file: file.display().to_string(),
            size: freqs.total(),
            distinct: freqs.distinct(),
            average_bits,
            payload_bits,
            codes: table
                .iter()
                .map(|(symbol, code)| CodeJson {
                    symbol: symbol.value(),
                    label: symbol_label(symbol),
                    count: count_of(symbol),
                    code: code.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{:>6} {:>6} {:>10} {:>4}  Code", "Symbol", "Label", "Count", "Bits");
    println!("{}", "-".repeat(40 + table.max_len().min(40)));
    for (symbol, code) in table.iter() {
        println!(
            "{:>6} {:>6} {:>10} {:>4}  {}",
            symbol.value(),
            symbol_label(symbol),
            count_of(symbol),
            code.len(),
            code
        );
    }
    println!();
    println!("{} symbols, {} bytes", table.len(), freqs.total());
    println!(
        "Average code length: {:.3} bits ({} payload bits)",
        average_bits, payload_bits
    );

    Ok(())
}
