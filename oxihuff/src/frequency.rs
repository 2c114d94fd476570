//! Symbol frequency counting.

use crate::config::{BITS_PER_WORD, PSEUDO_EOF, SYMBOL_COUNT};
use oxihuff_core::{BitSource, Result};

/// Occurrence counts for every symbol slot, including pseudo-EOF.
///
/// The pseudo-EOF count is always 1, so a table is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Count 8-bit symbols until the source is exhausted.
    pub fn from_source<S: BitSource + ?Sized>(source: &mut S) -> Result<Self> {
        let mut counts = [0u64; SYMBOL_COUNT];
        while let Some(byte) = source.read_bits(BITS_PER_WORD)? {
            counts[byte as usize] += 1;
        }
        Ok(Self::with_eof(counts))
    }

    /// Count the bytes of an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self::with_eof(counts)
    }

    /// Build a table from raw counts. Slot 256 is overwritten with 1.
    pub fn from_counts(counts: [u64; SYMBOL_COUNT]) -> Self {
        Self::with_eof(counts)
    }

    fn with_eof(mut counts: [u64; SYMBOL_COUNT]) -> Self {
        counts[PSEUDO_EOF as usize] = 1;
        Self { counts }
    }

    /// Count for a symbol, zero for out-of-range symbols.
    pub fn count(&self, symbol: u16) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    /// Symbols with a non-zero count, in ascending order.
    pub fn present(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u16, count))
    }

    /// Number of symbols with a non-zero count, pseudo-EOF included.
    pub fn distinct(&self) -> usize {
        self.present().count()
    }

    /// Number of literal bytes counted.
    pub fn input_bytes(&self) -> u64 {
        self.counts[..PSEUDO_EOF as usize].iter().sum()
    }
}
