//! Per-call compression statistics.

/// Sizes and tree shape recorded by one compress or decompress call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuffStats {
    /// Uncompressed size in bytes.
    pub input_bytes: u64,
    /// Compressed size in bytes, final padding included.
    ///
    /// When decompressing, this counts the stream bytes consumed up to the
    /// end of the pseudo-EOF codeword; bytes after it are not read.
    pub output_bytes: u64,
    /// Bits taken by the magic number and the serialized tree.
    pub header_bits: u64,
    /// Bits taken by the codewords, pseudo-EOF included.
    pub payload_bits: u64,
    /// Leaves in the tree.
    pub leaves: usize,
    /// Longest codeword in bits.
    pub max_code_len: usize,
}

impl HuffStats {
    /// Compressed size as a fraction of the uncompressed size.
    ///
    /// Returns 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }

    /// Total stream size in bits, before padding.
    pub fn total_bits(&self) -> u64 {
        self.header_bits + self.payload_bits
    }
}
