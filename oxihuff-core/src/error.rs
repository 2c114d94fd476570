//! Error types for OxiHuff operations.
//!
//! Every failure a compress or decompress call can hit is a variant of
//! [`OxiHuffError`]. None of them are recoverable for the running operation:
//! corrupt input cannot be repaired by reading it again.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream does not start with the expected magic number.
    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// Magic number the decoder was configured with.
        expected: u32,
        /// Value actually read from the stream.
        found: u32,
    },

    /// The serialized tree could not be reconstructed.
    #[error("Malformed tree header at bit position {bit_position}: {message}")]
    MalformedHeader {
        /// Bit position where the problem was detected.
        bit_position: u64,
        /// Description of the header error.
        message: String,
    },

    /// The payload ended before the end-of-stream symbol was decoded.
    #[error(
        "Truncated stream at bit position {bit_position}: \
         end-of-stream symbol not reached after {produced} bytes"
    )]
    TruncatedStream {
        /// Bit position where input ran out.
        bit_position: u64,
        /// Number of bytes emitted before the input ran out.
        produced: u64,
    },

    /// The input produced a byte on the encoding pass that the counting
    /// pass never saw.
    #[error("Input changed between passes: byte {byte:#04x} has no code")]
    InputChanged {
        /// The uncounted byte.
        byte: u8,
    },

    /// The code table has no codeword for the end-of-stream symbol, so the
    /// payload could not be terminated.
    #[error("Code table has no end-of-stream codeword")]
    MissingEndOfStream,

    /// A bit width outside 1..=32 was requested.
    #[error("Invalid bit count: {count} (must be 1-32)")]
    InvalidBitCount {
        /// The rejected bit width.
        count: u8,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: u32, found: u32) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create a malformed header error.
    pub fn malformed_header(bit_position: u64, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            bit_position,
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64, produced: u64) -> Self {
        Self::TruncatedStream {
            bit_position,
            produced,
        }
    }

    /// Create an input changed error.
    pub fn input_changed(byte: u8) -> Self {
        Self::InputChanged { byte }
    }

    /// Create an invalid bit count error.
    pub fn invalid_bit_count(count: u8) -> Self {
        Self::InvalidBitCount { count }
    }

    /// Returns `true` if the error was caused by corrupt or foreign input
    /// rather than by the environment.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic { .. } | Self::MalformedHeader { .. } | Self::TruncatedStream { .. }
        )
    }
}
