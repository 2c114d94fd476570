//! Tree header serialization.
//!
//! The tree is written in pre-order. An internal node is a single `0` bit
//! followed by its left then right subtree; a leaf is a `1` bit followed by
//! the 9-bit symbol value:
//!
//! ```text
//!        *            0            (root)
//!       / \           1 001000001  ('A')
//!     'A'  *          0
//!         / \         1 001000010  ('B')
//!       'B'  EOF      1 100000000  (pseudo-EOF)
//! ```
//!
//! The encoding is self-terminating: the reader knows from the bits alone
//! when the last subtree is complete.

use crate::config::{HuffConfig, MAX_TREE_DEPTH, PSEUDO_EOF, SYMBOL_BITS, SYMBOL_COUNT};
use crate::tree::{HuffTree, Node, NodeId};
use oxihuff_core::{BitSink, BitSource, OxiHuffError, Result};

/// Serialize `tree` and return the number of bits written.
pub fn write_tree<S: BitSink + ?Sized>(tree: &HuffTree, sink: &mut S) -> Result<u64> {
    let start = sink.bits_written();
    write_node(tree, tree.root(), sink)?;
    Ok(sink.bits_written() - start)
}

fn write_node<S: BitSink + ?Sized>(tree: &HuffTree, id: NodeId, sink: &mut S) -> Result<()> {
    match *tree.node(id) {
        Node::Leaf { symbol, .. } => {
            sink.write_bit(true)?;
            sink.write_bits(u32::from(symbol), SYMBOL_BITS)
        }
        Node::Internal { left, right, .. } => {
            sink.write_bit(false)?;
            write_node(tree, left, sink)?;
            write_node(tree, right, sink)
        }
    }
}

/// Reconstruct a tree from its serialized form.
///
/// Node weights are not part of the header and come back as 0.
pub fn read_tree<S: BitSource + ?Sized>(source: &mut S, config: &HuffConfig) -> Result<HuffTree> {
    let start = source.bit_position();
    let mut reader = TreeReader {
        source,
        strict: config.strict,
        nodes: Vec::new(),
        seen: [false; SYMBOL_COUNT],
    };
    let root = reader.read_node(0)?;

    let TreeReader { nodes, seen, .. } = reader;
    if nodes[root].is_leaf() {
        return Err(OxiHuffError::malformed_header(
            start,
            "tree is a single leaf",
        ));
    }
    if config.strict && !seen[PSEUDO_EOF as usize] {
        return Err(OxiHuffError::malformed_header(
            start,
            "tree has no end-of-stream leaf",
        ));
    }

    Ok(HuffTree::from_parts(nodes, root))
}

struct TreeReader<'a, S: BitSource + ?Sized> {
    source: &'a mut S,
    strict: bool,
    nodes: Vec<Node>,
    seen: [bool; SYMBOL_COUNT],
}

impl<S: BitSource + ?Sized> TreeReader<'_, S> {
    fn read_node(&mut self, depth: usize) -> Result<NodeId> {
        let position = self.source.bit_position();
        if depth > MAX_TREE_DEPTH {
            return Err(OxiHuffError::malformed_header(
                position,
                format!("tree deeper than {MAX_TREE_DEPTH} levels"),
            ));
        }

        let node = match self.source.read_bit()? {
            None => {
                return Err(OxiHuffError::malformed_header(
                    position,
                    "input ended inside tree",
                ));
            }
            Some(false) => {
                let left = self.read_node(depth + 1)?;
                let right = self.read_node(depth + 1)?;
                Node::Internal {
                    weight: 0,
                    left,
                    right,
                }
            }
            Some(true) => {
                let symbol = self.source.read_bits(SYMBOL_BITS)?.ok_or_else(|| {
                    OxiHuffError::malformed_header(position, "input ended inside leaf symbol")
                })?;
                if symbol > u32::from(PSEUDO_EOF) {
                    return Err(OxiHuffError::malformed_header(
                        position,
                        format!("leaf symbol {symbol} out of range"),
                    ));
                }
                let symbol = symbol as u16;
                if self.strict && self.seen[symbol as usize] {
                    return Err(OxiHuffError::malformed_header(
                        position,
                        format!("duplicate leaf for symbol {symbol}"),
                    ));
                }
                self.seen[symbol as usize] = true;
                Node::Leaf { symbol, weight: 0 }
            }
        };

        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::CodeTable;
    use crate::frequency::FrequencyTable;
    use oxihuff_core::{BitReader, BitWriter};
    use std::io::Cursor;

    fn serialize(tree: &HuffTree) -> (Vec<u8>, u64) {
        let mut writer = BitWriter::new(Vec::new());
        let bits = write_tree(tree, &mut writer).unwrap();
        (writer.into_inner().unwrap(), bits)
    }

    fn deserialize(data: &[u8], config: &HuffConfig) -> Result<HuffTree> {
        let mut reader = BitReader::new(Cursor::new(data));
        read_tree(&mut reader, config)
    }

    /// Pack a string of '0'/'1' characters MSB-first.
    fn pack(bits: &str) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        for c in bits.chars().filter(|c| !c.is_whitespace()) {
            writer.write_bit(c == '1').unwrap();
        }
        writer.into_inner().unwrap()
    }

    #[test]
    fn test_header_layout() {
        // Pseudo-EOF (weight 1) is extracted before 'A' (weight 2)
        let freq = FrequencyTable::from_bytes(b"AA");
        let tree = HuffTree::from_frequencies(&freq);
        let (bytes, bits) = serialize(&tree);

        assert_eq!(bits, 1 + 2 * 10);
        assert_eq!(bytes, pack("0 1100000000 1001000001"));
    }

    #[test]
    fn test_header_roundtrip_preserves_codes() {
        let inputs: [&[u8]; 4] = [
            b"AAAAAAAABBBCCD",
            b"",
            b"x",
            b"The quick brown fox jumps over the lazy dog",
        ];
        for data in inputs {
            let tree = HuffTree::from_frequencies(&FrequencyTable::from_bytes(data));
            let (bytes, bits) = serialize(&tree);

            let mut reader = BitReader::new(Cursor::new(&bytes));
            let restored = read_tree(&mut reader, &HuffConfig::TREE).unwrap();
            assert_eq!(reader.bits_read(), bits);

            assert_eq!(CodeTable::from_tree(&restored), CodeTable::from_tree(&tree));
            assert_eq!(restored.leaf_count(), tree.leaf_count());
        }
    }

    #[test]
    fn test_full_alphabet_roundtrip() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; 1 + b as usize % 5]).collect();
        let tree = HuffTree::from_frequencies(&FrequencyTable::from_bytes(&data));
        let (bytes, bits) = serialize(&tree);

        // 257 leaves, 256 internal nodes
        assert_eq!(bits, 257 * 10 + 256);
        let restored = deserialize(&bytes, &HuffConfig::TREE).unwrap();
        assert_eq!(CodeTable::from_tree(&restored), CodeTable::from_tree(&tree));
    }

    #[test]
    fn test_truncated_header() {
        let tree = HuffTree::from_frequencies(&FrequencyTable::from_bytes(b"abcabc"));
        let (bytes, _) = serialize(&tree);

        for cut in 0..bytes.len() {
            let err = deserialize(&bytes[..cut], &HuffConfig::TREE).unwrap_err();
            assert!(
                matches!(err, OxiHuffError::MalformedHeader { .. }),
                "cut at {cut}: {err}"
            );
        }
    }

    #[test]
    fn test_symbol_out_of_range() {
        let bytes = pack("0 1000000001 1111111111");
        let err = deserialize(&bytes, &HuffConfig::TREE).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_single_leaf_rejected() {
        let bytes = pack("1 100000000");
        let err = deserialize(&bytes, &HuffConfig::LENIENT).unwrap_err();
        assert!(err.to_string().contains("single leaf"));
    }

    #[test]
    fn test_missing_eof_strict_only() {
        let bytes = pack("0 1001000001 1001000010");
        let err = deserialize(&bytes, &HuffConfig::TREE).unwrap_err();
        assert!(err.to_string().contains("end-of-stream"));

        let tree = deserialize(&bytes, &HuffConfig::LENIENT).unwrap();
        assert!(!tree.has_eof());
    }

    #[test]
    fn test_duplicate_leaf_strict_only() {
        let bytes = pack("0 0 1001000001 1001000001 1100000000");
        let err = deserialize(&bytes, &HuffConfig::TREE).unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        assert!(deserialize(&bytes, &HuffConfig::LENIENT).is_ok());
    }

    #[test]
    fn test_excessive_depth_rejected() {
        // A long run of internal-node markers can never form a valid tree
        let bytes = vec![0u8; 64];
        let err = deserialize(&bytes, &HuffConfig::LENIENT).unwrap_err();
        assert!(err.to_string().contains("deeper"));
    }
}
