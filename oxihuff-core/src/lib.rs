//! # OxiHuff Core
//!
//! Core components for the OxiHuff compression library.
//!
//! This crate provides the building blocks the Huffman codec sits on:
//!
//! - [`bitstream`]: MSB-first bit-level I/O over any `Read`/`Write`
//! - [`traits`]: The `BitSource`/`BitSink`/`Rewind` seam the codec is written against
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L2: Codec (oxihuff)                                     │
//! │     Frequency count, tree build, header, encode/decode  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, BitSource/BitSink, errors     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::{BitReader, BitSource};
//! use std::io::Cursor;
//!
//! let data = vec![0xAB, 0xCD];
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bits(12).unwrap(), Some(0xABC));
//! assert_eq!(reader.bit_position(), 12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiHuffError, Result};
pub use traits::{BitSink, BitSource, Rewind};
