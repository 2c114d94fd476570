//! Code table generation.
//!
//! A symbol's codeword is its root-to-leaf path: `0` for every left step,
//! `1` for every right step. Since every internal node has two children,
//! the resulting code is prefix-free.

use crate::config::SYMBOL_COUNT;
use crate::frequency::FrequencyTable;
use crate::tree::{HuffTree, Node, NodeId};
use oxihuff_core::{BitSink, Result};
use std::fmt;

/// An ordered sequence of code bits, first bit first.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codeword {
    bits: Vec<bool>,
}

impl Codeword {
    /// Build a codeword from its bits.
    pub fn from_bits(bits: impl Into<Vec<bool>>) -> Self {
        Self { bits: bits.into() }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` for the empty codeword.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, first bit first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns `true` if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Write the codeword MSB-first, up to 32 bits per sink call.
    pub fn write_to<S: BitSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        for chunk in self.bits.chunks(32) {
            let value = chunk
                .iter()
                .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit));
            sink.write_bits(value, chunk.len() as u8)?;
        }
        Ok(())
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codeword({self})")
    }
}

/// Codewords for every symbol that has a leaf in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Codeword>>,
}

impl CodeTable {
    /// Derive the code table from a tree.
    pub fn from_tree(tree: &HuffTree) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        let mut path = Vec::new();
        collect(tree, tree.root(), &mut path, &mut codes);
        Self { codes }
    }

    /// Codeword for a symbol, if it has one.
    pub fn get(&self, symbol: u16) -> Option<&Codeword> {
        self.codes.get(symbol as usize).and_then(Option::as_ref)
    }

    /// Symbols and their codewords, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Codeword)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u16, code)))
    }

    /// Number of symbols with a codeword.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if no symbol has a codeword.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest codeword.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Returns `true` if no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Codeword> = self.iter().map(|(_, code)| code).collect();
        sorted.sort();
        // A prefix sorts directly before some word it prefixes
        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Payload size in bits for the counted input, pseudo-EOF included.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> u64 {
        freq.present()
            .map(|(symbol, count)| {
                let len = self.get(symbol).map_or(0, Codeword::len);
                count * len as u64
            })
            .sum()
    }
}

fn collect(tree: &HuffTree, id: NodeId, path: &mut Vec<bool>, codes: &mut [Option<Codeword>]) {
    match *tree.node(id) {
        Node::Leaf { symbol, .. } => {
            if let Some(slot) = codes.get_mut(symbol as usize) {
                *slot = Some(Codeword::from_bits(path.clone()));
            }
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            collect(tree, left, path, codes);
            path.pop();

            path.push(true);
            collect(tree, right, path, codes);
            path.pop();
        }
    }
}
