use super::BitWriter;
use crate::error::{Error, Result};
use std::fmt;
use std::io::Write;

/// Maximum number of bits a sequence can hold
pub const MAX_SIZE: usize = 256;

/// Bytes of backing storage
pub const MAX_BYTES: usize = MAX_SIZE / 8;

/// Fixed-capacity ordered sequence of bits, used to hold one symbol's code
///
/// Bits are packed at the tail of the backing array: the most recently
/// appended bit is the lowest bit of the last byte, and earlier bits sit
/// progressively higher. Logical position 0 (the first bit appended) lives
/// at physical bit `MAX_SIZE - size`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitSequence {
    bits: [u8; MAX_BYTES],
    size: usize,
}

impl BitSequence {
    pub fn new() -> Self {
        Self { bits: [0u8; MAX_BYTES], size: 0 }
    }

    /// Number of valid bits
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_full(&self) -> bool {
        self.size == MAX_SIZE
    }

    /// Append a bit at the logical end
    ///
    /// Shifts the occupied bytes left by one, carrying the top bit of each
    /// byte into its predecessor. A full sequence is left untouched.
    pub fn append_bit(&mut self, bit: bool) -> Result<()> {
        if self.is_full() {
            return Err(Error::BitsetOverflow { capacity: MAX_SIZE });
        }

        let first_byte = (MAX_BYTES - 1) - (self.size >> 3);
        for i in first_byte..MAX_BYTES - 1 {
            self.bits[i] = (self.bits[i] << 1) | (self.bits[i + 1] >> 7);
        }
        self.bits[MAX_BYTES - 1] = (self.bits[MAX_BYTES - 1] << 1) | bit as u8;
        self.size += 1;
        Ok(())
    }

    /// Remove and return the most recently appended bit
    pub fn pop_bit(&mut self) -> Option<bool> {
        if self.is_empty() {
            return None;
        }

        let bit = self.bits[MAX_BYTES - 1] & 1 != 0;
        let first_byte = (MAX_BYTES - 1) - ((self.size - 1) >> 3);
        for i in (first_byte + 1..MAX_BYTES).rev() {
            self.bits[i] = (self.bits[i] >> 1) | (self.bits[i - 1] << 7);
        }
        self.bits[first_byte] >>= 1;
        self.size -= 1;
        Some(bit)
    }

    /// Physical (byte, bit mask) of logical position `pos`
    fn locate(&self, pos: usize) -> Result<(usize, u8)> {
        if pos >= self.size {
            return Err(Error::IndexOutOfRange { pos, size: self.size });
        }
        let physical = MAX_SIZE - self.size + pos;
        Ok((physical >> 3, 0x80 >> (physical & 7)))
    }

    /// Read the bit at logical position `pos`
    pub fn get_bit(&self, pos: usize) -> Result<bool> {
        let (byte, mask) = self.locate(pos)?;
        Ok(self.bits[byte] & mask != 0)
    }

    /// Overwrite the bit at logical position `pos`, returning the stored value
    pub fn rewrite_at(&mut self, pos: usize, bit: bool) -> Result<bool> {
        let (byte, mask) = self.locate(pos)?;
        if bit {
            self.bits[byte] |= mask;
        } else {
            self.bits[byte] &= !mask;
        }
        Ok(self.bits[byte] & mask != 0)
    }

    /// Append every bit of `other`, in order
    pub fn copy_from(&mut self, other: &BitSequence) -> Result<()> {
        for pos in 0..other.size {
            self.append_bit(other.get_bit(pos)?)?;
        }
        Ok(())
    }

    /// Iterate over the logical bits, first appended first
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        let base = MAX_SIZE - self.size;
        (base..MAX_SIZE).map(move |physical| self.bits[physical >> 3] & (0x80 >> (physical & 7)) != 0)
    }

    /// Stream all bits to `writer` in order
    pub fn emit_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        for bit in self.iter() {
            writer.write_bit(bit)?;
        }
        Ok(())
    }

    /// Whether `self` is a prefix of (or equal to) `other`
    pub fn is_prefix_of(&self, other: &BitSequence) -> bool {
        self.size <= other.size && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Default for BitSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSequence(")?;
        for bit in self.iter() {
            write!(f, "{}", bit as u8)?;
        }
        write!(f, ")")
    }
}
