//! Bit-level I/O for the Huffman codec.
//!
//! This module provides `BitReader` and `BitWriter`, which read and write
//! data one bit-group at a time on top of any byte-oriented `Read` or
//! `Write`.
//!
//! # Bit Ordering
//!
//! Both sides are MSB-first: the first bit of a group is the most
//! significant bit of the value, and bytes are filled from their high bit
//! down. A final partial byte is padded with zero bits.
//!
//! # End of Input
//!
//! `BitReader::read_bits` returns `Ok(None)` when fewer bits remain than
//! requested. There is no in-band sentinel value.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();
//!     writer.write_bits(0b1100, 4).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
//! assert_eq!(reader.read_bits(4).unwrap(), Some(0b1100));
//! assert_eq!(reader.read_bits(8).unwrap(), None);
//! ```

use crate::error::{OxiHuffError, Result};
use crate::traits::{BitSink, BitSource, Rewind};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

/// Size of the staging buffer between the reader and the bit buffer.
const READ_CHUNK: usize = 8192;

#[inline]
fn check_count(count: u8) -> Result<()> {
    if count == 0 || count > 32 {
        return Err(OxiHuffError::invalid_bit_count(count));
    }
    Ok(())
}

/// An MSB-first bit reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader in chunks, so wrapping an
/// unbuffered file is fine.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Staging buffer of raw bytes.
    chunk: Box<[u8]>,
    /// Next unread byte in `chunk`.
    chunk_pos: usize,
    /// Number of valid bytes in `chunk`.
    chunk_len: usize,
    /// Set once the underlying reader reports end of input.
    exhausted: bool,
    /// Bytes taken from the underlying reader since construction or the
    /// last rewind.
    pulled: u64,
    /// Bit buffer (MSB-first, right-aligned).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chunk: vec![0u8; READ_CHUNK].into_boxed_slice(),
            chunk_pos: 0,
            chunk_len: 0,
            exhausted: false,
            pulled: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Bytes already staged but not yet consumed are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Fetch the next raw byte, refilling the staging buffer as needed.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.chunk_pos == self.chunk_len {
            if self.exhausted {
                return Ok(None);
            }
            loop {
                match self.reader.read(&mut self.chunk) {
                    Ok(0) => {
                        self.exhausted = true;
                        return Ok(None);
                    }
                    Ok(n) => {
                        self.chunk_pos = 0;
                        self.chunk_len = n;
                        self.pulled += n as u64;
                        break;
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        let byte = self.chunk[self.chunk_pos];
        self.chunk_pos += 1;
        Ok(Some(byte))
    }

    /// Ensure at least `count` bits are buffered. Returns `false` at end of
    /// input.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<bool> {
        while self.bits_in_buffer < count {
            match self.next_byte()? {
                Some(byte) => {
                    self.buffer = (self.buffer << 8) | u64::from(byte);
                    self.bits_in_buffer += 8;
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (1-32)
    ///
    /// # Returns
    ///
    /// The bits read as a u32 with the first bit read in the most
    /// significant position, or `None` if fewer than `count` bits remain.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        check_count(count)?;

        if !self.fill_buffer(count)? {
            return Ok(None);
        }

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = ((self.buffer >> shift) & mask) as u32;

        self.bits_in_buffer = shift;
        self.buffer &= (1u64 << shift) - 1;
        self.total_bits_read += u64::from(count);

        Ok(Some(value))
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Seek the underlying reader back to where it was when this
    /// `BitReader` was created and discard all buffered state.
    ///
    /// A reader handed over mid-stream is not rewound past its starting
    /// position.
    pub fn rewind(&mut self) -> Result<()> {
        let back = i64::try_from(self.pulled).map_err(|_| {
            io::Error::new(ErrorKind::InvalidInput, "too many bytes read to rewind")
        })?;
        self.reader.seek(SeekFrom::Current(-back))?;
        self.pulled = 0;
        self.chunk_pos = 0;
        self.chunk_len = 0;
        self.exhausted = false;
        self.buffer = 0;
        self.bits_in_buffer = 0;
        self.total_bits_read = 0;
        Ok(())
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        BitReader::read_bits(self, count)
    }

    fn bit_position(&self) -> u64 {
        self.total_bits_read
    }
}

impl<R: Read + Seek> Rewind for BitReader<R> {
    fn rewind(&mut self) -> Result<()> {
        BitReader::rewind(self)
    }
}

/// An MSB-first bit writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and writes complete
/// bytes to the underlying writer. Call `flush()` when done to write any
/// remaining partial byte; dropping the writer does this on a best-effort
/// basis.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (MSB-first, right-aligned).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written, excluding padding.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume this `BitWriter`, flushing any remaining bits, and return the
    /// underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        // Skip Drop, the buffer is already empty
        let this = std::mem::ManuallyDrop::new(self);
        // SAFETY: `this` is never used or dropped again, so the writer is
        // moved out exactly once.
        Ok(unsafe { std::ptr::read(&this.writer) })
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        if self.bits_in_buffer >= 32 {
            let shift = self.bits_in_buffer - 32;
            let word = (self.buffer >> shift) as u32;
            self.writer.write_all(&word.to_be_bytes())?;
            self.bits_in_buffer = shift;
            self.buffer &= (1u64 << shift) - 1;
        }

        while self.bits_in_buffer >= 8 {
            let shift = self.bits_in_buffer - 8;
            let byte = (self.buffer >> shift) as u8;
            self.writer.write_all(&[byte])?;
            self.bits_in_buffer = shift;
            self.buffer &= (1u64 << shift) - 1;
        }
        Ok(())
    }

    /// Write up to 32 bits to the stream.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write, right-aligned
    /// * `count` - Number of low bits of `value` to write (1-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        check_count(count)?;

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };

        // At most 7 bits are left over from the previous call
        self.buffer = (self.buffer << count) | u64::from(value & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        self.flush_bytes()
    }

    /// Pad to a byte boundary with zeros and flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            let byte = (self.buffer << padding) as u8;
            self.writer.write_all(&[byte])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }

        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        BitWriter::write_bits(self, value, count)
    }

    fn flush(&mut self) -> Result<()> {
        BitWriter::flush(self)
    }

    fn bits_written(&self) -> u64 {
        self.total_bits_written
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}
