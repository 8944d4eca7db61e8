//! Byte frequency tables.
//!
//! A [`FrequencyTable`] counts how often each of the 256 byte values occurs.
//! It is the only input the Huffman tree builder needs.

use crate::error::Result;
use std::io::{ErrorKind, Read};

/// Number of distinct byte symbols.
pub const BYTE_SYMBOLS: usize = 256;

/// Occurrence counts for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; BYTE_SYMBOLS],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; BYTE_SYMBOLS],
        }
    }

    /// Count every byte of `data`.
    ///
    /// # Example
    ///
    /// ```
    /// use oxihuff_core::FrequencyTable;
    ///
    /// let freqs = FrequencyTable::from_bytes(b"abracadabra");
    /// assert_eq!(freqs.get(b'a'), 5);
    /// assert_eq!(freqs.distinct(), 5);
    /// assert_eq!(freqs.total(), 11);
    /// ```
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Count every byte produced by `reader` until it is exhausted.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut buf = [0u8; 8192];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => table.update(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(table)
    }

    /// Add the bytes of another chunk to the running counts.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Set the count for a single symbol.
    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Get the count for a symbol.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |acc, &count| acc.saturating_add(count))
    }

    /// Returns `true` if no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate over `(symbol, count)` pairs with non-zero counts, in
    /// ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            let slot = &mut table.counts[symbol as usize];
            *slot = slot.saturating_add(count);
        }
        table
    }
}
