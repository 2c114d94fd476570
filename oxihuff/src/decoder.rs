//! Huffman decoder (decompression).
//!
//! Decoding walks the tree one bit at a time and stops exactly when the
//! pseudo-EOF leaf is reached. The stream carries no length field, so
//! running out of bits first is always an error, and padding after the
//! pseudo-EOF codeword is never read.

use crate::config::{BITS_PER_INT, BITS_PER_WORD, HuffConfig, PSEUDO_EOF};
use crate::header::read_tree;
use crate::stats::HuffStats;
use crate::tree::{HuffTree, Node};
use log::debug;
use oxihuff_core::{BitSink, BitSource, OxiHuffError, Result};

/// Huffman decoder for decompression.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffDecoder {
    config: HuffConfig,
}

impl HuffDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: HuffConfig) -> Self {
        Self { config }
    }

    /// Get the decoder configuration.
    pub fn config(&self) -> &HuffConfig {
        &self.config
    }

    /// Decompress one stream from `source` into `sink`.
    ///
    /// Nothing is written to `sink` unless the magic number matches. If the
    /// header or payload turns out to be corrupt, the bytes decoded so far
    /// remain in `sink`; callers should discard them.
    ///
    /// The sink is flushed before returning, on failure as well.
    pub fn decompress<S, K>(&self, source: &mut S, sink: &mut K) -> Result<HuffStats>
    where
        S: BitSource + ?Sized,
        K: BitSink + ?Sized,
    {
        let result = self.decompress_inner(source, sink);
        let flushed = sink.flush();
        let stats = result?;
        flushed?;

        debug!(
            "decompressed {} bytes into {} bytes ({} header bits, {} payload bits, {} leaves)",
            stats.output_bytes, stats.input_bytes, stats.header_bits, stats.payload_bits, stats.leaves
        );
        Ok(stats)
    }

    fn decompress_inner<S, K>(&self, source: &mut S, sink: &mut K) -> Result<HuffStats>
    where
        S: BitSource + ?Sized,
        K: BitSink + ?Sized,
    {
        let start = source.bit_position();
        self.read_magic(source)?;
        let tree = read_tree(source, &self.config)?;
        let header_bits = source.bit_position() - start;

        let input_bytes = decode_payload(&tree, source, sink)?;
        let total_bits = source.bit_position() - start;

        Ok(HuffStats {
            input_bytes,
            output_bytes: total_bits.div_ceil(8),
            header_bits,
            payload_bits: total_bits - header_bits,
            leaves: tree.leaf_count(),
            max_code_len: tree.depth(),
        })
    }

    /// Check the leading magic number.
    ///
    /// A stream shorter than 32 bits is reported with the bytes that were
    /// present, zero-padded on the right.
    pub fn read_magic<S: BitSource + ?Sized>(&self, source: &mut S) -> Result<()> {
        let expected = self.config.magic;
        let mut found = 0u32;
        for read in 0..BITS_PER_INT / BITS_PER_WORD {
            match source.read_bits(BITS_PER_WORD)? {
                Some(byte) => found = (found << BITS_PER_WORD) | byte,
                None => {
                    let missing = BITS_PER_INT / BITS_PER_WORD - read;
                    let found = found.checked_shl(u32::from(missing * BITS_PER_WORD)).unwrap_or(0);
                    return Err(OxiHuffError::invalid_magic(expected, found));
                }
            }
        }

        if found != expected {
            return Err(OxiHuffError::invalid_magic(expected, found));
        }
        Ok(())
    }
}

/// Decode codewords until the pseudo-EOF leaf is reached. Returns the number
/// of bytes written to `sink`.
pub fn decode_payload<S, K>(tree: &HuffTree, source: &mut S, sink: &mut K) -> Result<u64>
where
    S: BitSource + ?Sized,
    K: BitSink + ?Sized,
{
    let root = tree.root();
    let mut current = root;
    let mut produced = 0u64;

    loop {
        let Some(bit) = source.read_bit()? else {
            return Err(OxiHuffError::truncated(source.bit_position(), produced));
        };

        current = match *tree.node(current) {
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            Node::Leaf { .. } => {
                return Err(OxiHuffError::malformed_header(
                    source.bit_position(),
                    "tree is a single leaf",
                ));
            }
        };

        if let Node::Leaf { symbol, .. } = *tree.node(current) {
            if symbol == PSEUDO_EOF {
                return Ok(produced);
            }
            sink.write_bits(u32::from(symbol), BITS_PER_WORD)?;
            produced += 1;
            current = root;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::HuffEncoder;
    use oxihuff_core::{BitReader, BitWriter};
    use std::io::Cursor;

    fn encode(data: &[u8]) -> Vec<u8> {
        let mut source = BitReader::new(Cursor::new(data));
        let mut sink = BitWriter::new(Vec::new());
        HuffEncoder::default()
            .compress(&mut source, &mut sink)
            .unwrap();
        sink.into_inner().unwrap()
    }

    fn decode(data: &[u8], config: HuffConfig) -> (Result<HuffStats>, Vec<u8>) {
        let mut source = BitReader::new(Cursor::new(data));
        let mut output = Vec::new();
        let result = {
            let mut sink = BitWriter::new(&mut output);
            HuffDecoder::new(config).decompress(&mut source, &mut sink)
        };
        (result, output)
    }

    #[test]
    fn test_decode_textbook() {
        let original = b"AAAAAAAABBBCCD";
        let compressed = encode(original);
        let (result, output) = decode(&compressed, HuffConfig::TREE);

        let stats = result.unwrap();
        assert_eq!(output, original);
        assert_eq!(stats.input_bytes, 14);
        assert_eq!(stats.payload_bits, 28);
        assert_eq!(stats.header_bits, 86);
    }

    #[test]
    fn test_output_bytes_excludes_trailing_data() {
        let compressed = encode(b"AAAAAAAABBBCCD");
        let mut padded = compressed.clone();
        padded.extend_from_slice(&[0xFF; 8]);

        let (result, output) = decode(&padded, HuffConfig::TREE);
        assert_eq!(output, b"AAAAAAAABBBCCD");
        assert_eq!(result.unwrap().output_bytes, compressed.len() as u64);
    }

    #[test]
    fn test_decode_empty() {
        let compressed = encode(b"");
        let (result, output) = decode(&compressed, HuffConfig::TREE);
        assert_eq!(result.unwrap().input_bytes, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_bad_magic_writes_nothing() {
        let mut compressed = encode(b"some data");
        compressed[0] ^= 0xFF;
        let (result, output) = decode(&compressed, HuffConfig::TREE);

        match result {
            Err(OxiHuffError::InvalidMagic { expected, found }) => {
                assert_eq!(expected, 0xFACE_8201);
                assert_eq!(found, 0x05CE_8201);
            }
            other => panic!("expected InvalidMagic, got {other:?}"),
        }
        assert!(output.is_empty());
    }

    #[test]
    fn test_short_magic() {
        let (result, output) = decode(&[0xFA, 0xCE], HuffConfig::TREE);
        match result {
            Err(OxiHuffError::InvalidMagic { found, .. }) => assert_eq!(found, 0xFACE_0000),
            other => panic!("expected InvalidMagic, got {other:?}"),
        }
        assert!(output.is_empty());

        let (result, _) = decode(&[], HuffConfig::TREE);
        assert!(matches!(
            result,
            Err(OxiHuffError::InvalidMagic { found: 0, .. })
        ));
    }

    #[test]
    fn test_magic_mismatch_with_custom_config() {
        let compressed = encode(b"abc");
        let (result, _) = decode(&compressed, HuffConfig::TREE.with_magic(0xFACE_8200));
        assert!(matches!(result, Err(OxiHuffError::InvalidMagic { .. })));
    }

    #[test]
    fn test_truncated_payload() {
        let original = b"AAAAAAAABBBCCD";
        let compressed = encode(original);

        // Header ends at bit 86, inside byte 10
        let (result, output) = decode(&compressed[..12], HuffConfig::TREE);
        match result {
            Err(OxiHuffError::TruncatedStream { produced, .. }) => {
                assert_eq!(produced as usize, output.len());
                assert!(original.starts_with(&output));
            }
            other => panic!("expected TruncatedStream, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_eof_leaf_lenient() {
        // Internal(Leaf 'A', Leaf 'B') followed by a few payload bits
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xFACE_8201, 32).unwrap();
        writer.write_bits(0, 1).unwrap();
        writer.write_bits(0b1_001000001, 10).unwrap();
        writer.write_bits(0b1_001000010, 10).unwrap();
        writer.write_bits(0b0110, 4).unwrap();
        let stream = writer.into_inner().unwrap();

        let (result, output) = decode(&stream, HuffConfig::LENIENT);
        assert!(matches!(result, Err(OxiHuffError::TruncatedStream { .. })));
        assert!(output.starts_with(b"ABBA"));

        let (result, output) = decode(&stream, HuffConfig::TREE);
        assert!(matches!(result, Err(OxiHuffError::MalformedHeader { .. })));
        assert!(output.is_empty());
    }
}
