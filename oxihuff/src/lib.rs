//! # OxiHuff: Pure Rust Huffman Compression
//!
//! This crate compresses a byte stream with a Huffman code derived from the
//! stream's own symbol frequencies, and stores the decoding tree in front of
//! the payload so every stream is self-contained.
//!
//! ## Stream Format
//!
//! All fields are packed MSB-first:
//!
//! | Field   | Width    | Value                                           |
//! |---------|----------|-------------------------------------------------|
//! | Magic   | 32 bits  | `0xFACE8201`                                    |
//! | Tree    | variable | pre-order: `0` internal, `1` + 9-bit symbol leaf |
//! | Payload | variable | one codeword per byte, then the pseudo-EOF code  |
//!
//! There is no length field. Symbol 256 (pseudo-EOF) always has a leaf and
//! terminates the payload; the final byte is zero-padded.
//!
//! ## Two Passes
//!
//! Compression reads its input twice, once to count and once to encode, so
//! the streaming API needs a rewindable source ([`compress_stream`]).
//! [`compress_reader`] accepts a one-shot reader by buffering it in memory.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff::{compress, decompress};
//!
//! let original = b"AAAAAAAABBBCCD";
//!
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod codes;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod header;
pub mod inspect;
pub mod stats;
pub mod tree;

pub use codes::{CodeTable, Codeword};
pub use config::{HUFF_TREE, HuffConfig, PSEUDO_EOF};
pub use decoder::HuffDecoder;
pub use encoder::HuffEncoder;
pub use frequency::FrequencyTable;
pub use inspect::{StreamInfo, inspect, inspect_with};
pub use oxihuff_core::{OxiHuffError, Result};
pub use stats::HuffStats;
pub use tree::{HuffTree, Node, NodeId};

use oxihuff_core::{BitReader, BitWriter};
use std::io::{Cursor, Read, Seek, Write};

/// Compress an in-memory buffer with the default configuration.
///
/// # Example
///
/// ```rust
/// use oxihuff::compress;
///
/// let compressed = compress(&[0x41; 1000]).unwrap();
/// assert!(compressed.len() < 200);
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, HuffConfig::default())
}

/// Compress an in-memory buffer with the given configuration.
pub fn compress_with(data: &[u8], config: HuffConfig) -> Result<Vec<u8>> {
    let mut source = BitReader::new(Cursor::new(data));
    let mut sink = BitWriter::new(Vec::new());
    HuffEncoder::new(config).compress(&mut source, &mut sink)?;
    sink.into_inner()
}

/// Decompress an in-memory stream with the default configuration.
///
/// On failure nothing is returned; partial output is discarded.
///
/// # Example
///
/// ```rust
/// use oxihuff::{OxiHuffError, decompress};
///
/// let err = decompress(b"not a huffman stream").unwrap_err();
/// assert!(matches!(err, OxiHuffError::InvalidMagic { .. }));
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, HuffConfig::default())
}

/// Decompress an in-memory stream with the given configuration.
pub fn decompress_with(data: &[u8], config: HuffConfig) -> Result<Vec<u8>> {
    let mut source = BitReader::new(Cursor::new(data));
    let mut sink = BitWriter::new(Vec::new());
    HuffDecoder::new(config).decompress(&mut source, &mut sink)?;
    sink.into_inner()
}

/// Compress from a seekable reader into a writer.
///
/// Compression starts at the reader's current position. The reader is
/// rewound to that position between the counting and encoding passes, so
/// it must not be shared with anything else meanwhile.
pub fn compress_stream<R, W>(reader: R, writer: W, config: HuffConfig) -> Result<HuffStats>
where
    R: Read + Seek,
    W: Write,
{
    let mut source = BitReader::new(reader);
    let mut sink = BitWriter::new(writer);
    HuffEncoder::new(config).compress(&mut source, &mut sink)
}

/// Compress from a one-shot reader into a writer.
///
/// The whole input is buffered in memory for the second pass.
pub fn compress_reader<R, W>(mut reader: R, writer: W, config: HuffConfig) -> Result<HuffStats>
where
    R: Read,
    W: Write,
{
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    compress_stream(Cursor::new(buffer), writer, config)
}

/// Decompress from a reader into a writer.
///
/// The writer is flushed even when decoding fails; whatever was decoded
/// before the failure has been written and should be discarded.
pub fn decompress_stream<R, W>(reader: R, writer: W, config: HuffConfig) -> Result<HuffStats>
where
    R: Read,
    W: Write,
{
    let mut source = BitReader::new(reader);
    let mut sink = BitWriter::new(writer);
    HuffDecoder::new(config).decompress(&mut source, &mut sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_textbook() {
        let original = b"AAAAAAAABBBCCD";
        let compressed = compress(original).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress(b"").unwrap();
        assert_eq!(compressed.len(), 7);
        let decompressed = decompress(&compressed).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn test_single_byte() {
        let original = b"A";
        let compressed = compress(original).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_all_byte_values() {
        let original: Vec<u8> = (0..=255).collect();
        let compressed = compress(&original).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_stream_roundtrip() {
        let original = b"streams are read twice when compressing".repeat(20);

        let mut compressed = Vec::new();
        let stats =
            compress_stream(Cursor::new(&original), &mut compressed, HuffConfig::TREE).unwrap();
        assert_eq!(stats.input_bytes, original.len() as u64);
        assert_eq!(stats.output_bytes, compressed.len() as u64);

        let mut decompressed = Vec::new();
        let stats =
            decompress_stream(Cursor::new(&compressed), &mut decompressed, HuffConfig::TREE)
                .unwrap();
        assert_eq!(decompressed, original);
        assert_eq!(stats.input_bytes, original.len() as u64);
    }

    #[test]
    fn test_reader_is_buffered() {
        let original = b"one-shot input".to_vec();
        // `&[u8]` implements Read but not Seek
        let mut compressed = Vec::new();
        compress_reader(&original[..], &mut compressed, HuffConfig::TREE).unwrap();
        assert_eq!(compressed, compress(&original).unwrap());
    }

    #[test]
    fn test_decompress_discards_partial_output() {
        let compressed = compress(b"partial output must not leak").unwrap();
        let err = decompress(&compressed[..compressed.len() - 2]).unwrap_err();
        assert!(matches!(err, OxiHuffError::TruncatedStream { .. }));
    }
}
