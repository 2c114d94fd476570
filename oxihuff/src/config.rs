//! Stream constants and codec configuration.

/// Bits per literal symbol.
pub const BITS_PER_WORD: u8 = 8;

/// Width of the magic number at the start of a stream.
pub const BITS_PER_INT: u8 = 32;

/// Number of literal byte values.
pub const ALPHABET_SIZE: usize = 1 << BITS_PER_WORD;

/// End-of-stream pseudo-symbol, one past the last literal byte.
pub const PSEUDO_EOF: u16 = ALPHABET_SIZE as u16;

/// Total number of symbol slots, literals plus pseudo-EOF.
pub const SYMBOL_COUNT: usize = ALPHABET_SIZE + 1;

/// Width of a leaf's symbol value in the serialized tree.
pub const SYMBOL_BITS: u8 = BITS_PER_WORD + 1;

/// Deepest leaf a tree over [`SYMBOL_COUNT`] distinct symbols can have.
pub const MAX_TREE_DEPTH: usize = SYMBOL_COUNT - 1;

/// Base of the Huffman magic number family.
pub const HUFF_NUMBER: u32 = 0xFACE_8200;

/// Magic number for streams carrying a serialized tree header.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

/// Codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffConfig {
    /// Magic number written before the tree and expected when reading.
    pub magic: u32,
    /// Reject headers with duplicate leaves or without a pseudo-EOF leaf.
    ///
    /// Leaf symbols above [`PSEUDO_EOF`], trees deeper than
    /// [`MAX_TREE_DEPTH`] and single-leaf trees are rejected either way.
    pub strict: bool,
}

impl HuffConfig {
    /// Standard tree-header configuration with strict header checks.
    pub const TREE: Self = Self {
        magic: HUFF_TREE,
        strict: true,
    };

    /// Tree-header configuration that accepts any structurally complete
    /// tree. A tree without a pseudo-EOF leaf then fails as a truncated
    /// stream once the payload runs out.
    pub const LENIENT: Self = Self {
        magic: HUFF_TREE,
        strict: false,
    };

    /// Replace the magic number.
    pub fn with_magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    /// Enable or disable strict header checks.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for HuffConfig {
    fn default() -> Self {
        Self::TREE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(ALPHABET_SIZE, 256);
        assert_eq!(PSEUDO_EOF, 256);
        assert_eq!(SYMBOL_COUNT, 257);
        assert_eq!(SYMBOL_BITS, 9);
        assert_eq!(MAX_TREE_DEPTH, 256);
        assert_eq!(HUFF_TREE, 0xFACE_8201);
        // Every symbol fits the leaf field
        assert!(u32::from(PSEUDO_EOF) < (1 << SYMBOL_BITS));
    }

    #[test]
    fn test_tree_config() {
        let config = HuffConfig::default();
        assert_eq!(config, HuffConfig::TREE);
        assert_eq!(config.magic, 0xFACE_8201);
        assert!(config.strict);
    }

    #[test]
    fn test_builders() {
        let config = HuffConfig::LENIENT.with_magic(0x1234_5678);
        assert_eq!(config.magic, 0x1234_5678);
        assert!(!config.strict);
        assert!(config.with_strict(true).strict);
    }
}
