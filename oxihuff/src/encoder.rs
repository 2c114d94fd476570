//! Huffman encoder (compression).

use crate::codes::CodeTable;
use crate::config::{BITS_PER_INT, BITS_PER_WORD, HuffConfig, PSEUDO_EOF};
use crate::frequency::FrequencyTable;
use crate::header::write_tree;
use crate::stats::HuffStats;
use crate::tree::HuffTree;
use log::debug;
use oxihuff_core::{BitSink, BitSource, OxiHuffError, Result, Rewind};

/// Huffman encoder for compression.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffEncoder {
    config: HuffConfig,
}

impl HuffEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: HuffConfig) -> Self {
        Self { config }
    }

    /// Get the encoder configuration.
    pub fn config(&self) -> &HuffConfig {
        &self.config
    }

    /// Compress everything in `source` into `sink`.
    ///
    /// # Algorithm
    ///
    /// 1. Count every byte of the source
    /// 2. Build the tree and derive the code table
    /// 3. Write the magic number and the serialized tree
    /// 4. Rewind the source and write each byte's codeword
    /// 5. Write the pseudo-EOF codeword
    ///
    /// The sink is flushed before returning, on failure as well.
    pub fn compress<S, K>(&self, source: &mut S, sink: &mut K) -> Result<HuffStats>
    where
        S: Rewind + ?Sized,
        K: BitSink + ?Sized,
    {
        let result = self.compress_inner(source, sink);
        let flushed = sink.flush();
        let stats = result?;
        flushed?;

        debug!(
            "compressed {} bytes into {} bytes ({} header bits, {} payload bits, {} leaves)",
            stats.input_bytes, stats.output_bytes, stats.header_bits, stats.payload_bits, stats.leaves
        );
        Ok(stats)
    }

    fn compress_inner<S, K>(&self, source: &mut S, sink: &mut K) -> Result<HuffStats>
    where
        S: Rewind + ?Sized,
        K: BitSink + ?Sized,
    {
        let freq = FrequencyTable::from_source(source)?;
        let tree = HuffTree::from_frequencies(&freq);
        let codes = CodeTable::from_tree(&tree);

        let start = sink.bits_written();
        sink.write_bits(self.config.magic, BITS_PER_INT)?;
        write_tree(&tree, sink)?;
        let header_bits = sink.bits_written() - start;

        source.rewind()?;
        let input_bytes = write_payload(&codes, source, sink)?;
        let total_bits = sink.bits_written() - start;

        Ok(HuffStats {
            input_bytes,
            output_bytes: total_bits.div_ceil(8),
            header_bits,
            payload_bits: total_bits - header_bits,
            leaves: tree.leaf_count(),
            max_code_len: codes.max_len(),
        })
    }
}

/// Write the codeword of every byte in `source`, then the pseudo-EOF
/// codeword. Returns the number of bytes encoded.
///
/// Fails with [`OxiHuffError::MissingEndOfStream`] if `codes` came from a
/// tree without a pseudo-EOF leaf, such as one read in lenient mode.
pub fn write_payload<S, K>(codes: &CodeTable, source: &mut S, sink: &mut K) -> Result<u64>
where
    S: BitSource + ?Sized,
    K: BitSink + ?Sized,
{
    let mut count = 0u64;
    while let Some(byte) = source.read_bits(BITS_PER_WORD)? {
        let code = codes
            .get(byte as u16)
            .ok_or_else(|| OxiHuffError::input_changed(byte as u8))?;
        code.write_to(sink)?;
        count += 1;
    }

    codes
        .get(PSEUDO_EOF)
        .ok_or(OxiHuffError::MissingEndOfStream)?
        .write_to(sink)?;

    Ok(count)
}
