//! Bit source and sink traits.
//!
//! The Huffman codec never touches bytes directly. It consumes a
//! [`BitSource`] and produces into a [`BitSink`], so any bit-level
//! reader or writer can be plugged in underneath.

use crate::error::Result;

/// A sequential, MSB-first source of bits.
pub trait BitSource {
    /// Read `count` bits (1-32) and return them right-aligned.
    ///
    /// Returns `Ok(None)` at end of input, i.e. when fewer than `count`
    /// bits remain. `Err` is reserved for failures of the underlying reader.
    fn read_bits(&mut self, count: u8) -> Result<Option<u32>>;

    /// Number of bits consumed so far.
    fn bit_position(&self) -> u64;

    /// Read a single bit.
    fn read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|bit| bit != 0))
    }
}

/// A bit source that can be restarted from its first bit.
///
/// Compression reads its input twice (count, then encode) and needs this.
pub trait Rewind: BitSource {
    /// Reposition the source at bit 0.
    fn rewind(&mut self) -> Result<()>;
}

/// A sequential, MSB-first sink of bits.
pub trait BitSink {
    /// Write the low `count` bits (1-32) of `value`, most significant first.
    fn write_bits(&mut self, value: u32, count: u8) -> Result<()>;

    /// Pad the final partial byte with zero bits and flush the underlying
    /// writer.
    fn flush(&mut self) -> Result<()>;

    /// Number of bits written so far, excluding padding.
    fn bits_written(&self) -> u64;

    /// Write a single bit.
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(u32::from(bit), 1)
    }
}

impl<T: BitSource + ?Sized> BitSource for &mut T {
    fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        (**self).read_bits(count)
    }

    fn bit_position(&self) -> u64 {
        (**self).bit_position()
    }
}

impl<T: Rewind + ?Sized> Rewind for &mut T {
    fn rewind(&mut self) -> Result<()> {
        (**self).rewind()
    }
}

impl<T: BitSink + ?Sized> BitSink for &mut T {
    fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        (**self).write_bits(value, count)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn bits_written(&self) -> u64 {
        (**self).bits_written()
    }
}
