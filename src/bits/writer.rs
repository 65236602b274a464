use crate::error::Result;
use std::io::Write;

/// Bit-level writer for the container stream
///
/// Writes bits MSB-first: the first bit written lands in the high bit
/// of the first output byte.
pub struct BitWriter<W: Write> {
    writer: W,
    /// Current byte being built (filled bits are the low `bits_filled` bits)
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_filled: u8,
    /// Total bits ever written, including the pending partial byte
    bits_written: u64,
    /// Whole bytes handed to the inner writer
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, current_byte: 0, bits_filled: 0, bits_written: 0, bytes_written: 0 }
    }

    fn emit(&mut self, byte: u8) -> Result<()> {
        self.writer.write_all(&[byte])?;
        self.bytes_written += 1;
        Ok(())
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.current_byte = (self.current_byte << 1) | bit as u8;
        self.bits_filled += 1;
        self.bits_written += 1;

        if self.bits_filled == 8 {
            let byte = self.current_byte;
            self.current_byte = 0;
            self.bits_filled = 0;
            self.emit(byte)?;
        }
        Ok(())
    }

    /// Write a full byte, merging it across the pending partial byte if unaligned
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.bits_written += 8;

        if self.bits_filled == 0 {
            return self.emit(byte);
        }

        // High (8 - filled) bits complete the pending byte, the low `filled`
        // bits become the new pending byte.
        let filled = self.bits_filled;
        let shift = 8 - filled;
        let completed = (self.current_byte << shift) | (byte >> filled);
        self.current_byte = byte & ((1u8 << filled) - 1);
        self.emit(completed)
    }

    /// Write the low `n` bits (0-32) of `value`, most significant first
    pub fn write_number(&mut self, value: u32, n: u8) -> Result<()> {
        debug_assert!(n <= 32, "Cannot write more than 32 bits at once");

        for shift in (0..n).rev() {
            self.write_bit((value >> shift) & 1 != 0)?;
        }
        Ok(())
    }

    /// Flush the pending partial byte, zero-padding its low bits
    ///
    /// Returns the number of padding bits added.
    pub fn write_last(&mut self) -> Result<u8> {
        if self.bits_filled == 0 {
            return Ok(0);
        }

        let padding = 8 - self.bits_filled;
        let byte = self.current_byte << padding;
        self.current_byte = 0;
        self.bits_filled = 0;
        self.emit(byte)?;
        Ok(padding)
    }

    /// Total bits written so far (excluding padding)
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Whole bytes handed to the inner writer so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Bits buffered in the pending partial byte (0-7)
    pub fn bits_filled(&self) -> u8 {
        self.bits_filled
    }

    /// Get a reference to the inner writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Pad the final byte, flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.write_last()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}
