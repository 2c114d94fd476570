//! Stream inspection without decoding the payload.

use crate::codes::CodeTable;
use crate::config::HuffConfig;
use crate::decoder::HuffDecoder;
use crate::header::read_tree;
use crate::tree::HuffTree;
use oxihuff_core::{BitReader, BitSource, Result};
use std::io::Cursor;

/// What the header of a compressed stream describes.
#[derive(Debug, Clone)]
pub struct StreamInfo {
    /// Magic number at the start of the stream.
    pub magic: u32,
    /// Bits taken by the magic number and the serialized tree.
    pub header_bits: u64,
    /// Size of the whole stream in bytes.
    pub stream_bytes: u64,
    /// The reconstructed tree.
    pub tree: HuffTree,
    /// Codewords induced by the tree.
    pub codes: CodeTable,
}

impl StreamInfo {
    /// Number of leaves in the tree.
    pub fn leaves(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Depth of the tree, equal to the longest codeword.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Bits after the header, padding included.
    pub fn payload_bits(&self) -> u64 {
        (self.stream_bytes * 8).saturating_sub(self.header_bits)
    }
}

/// Inspect a stream written with the default configuration.
pub fn inspect(data: &[u8]) -> Result<StreamInfo> {
    inspect_with(data, HuffConfig::default())
}

/// Validate the magic number and tree header of `data` and describe them.
pub fn inspect_with(data: &[u8], config: HuffConfig) -> Result<StreamInfo> {
    let mut reader = BitReader::new(Cursor::new(data));
    HuffDecoder::new(config).read_magic(&mut reader)?;
    let tree = read_tree(&mut reader, &config)?;
    let codes = CodeTable::from_tree(&tree);

    Ok(StreamInfo {
        magic: config.magic,
        header_bits: reader.bit_position(),
        stream_bytes: data.len() as u64,
        tree,
        codes,
    })
}
