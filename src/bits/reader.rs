use crate::error::{Error, Result};
use std::io::{ErrorKind, Read};

/// Bit-level reader for the container stream
///
/// Bits are read MSB-first. The reader keeps one byte of lookahead so the
/// end of input is observable before the final byte has been consumed.
pub struct BitReader<R: Read> {
    reader: R,
    /// Byte currently being consumed, remaining bits left-aligned
    current_byte: u8,
    /// Bits remaining in `current_byte` (0-8)
    bits_filled: u8,
    /// Next byte of input, `None` once the inner reader is exhausted
    lookahead: Option<u8>,
    /// Total bytes pulled from the inner reader
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a reader and prime its lookahead byte
    pub fn new(reader: R) -> Result<Self> {
        let mut bits = Self { reader, current_byte: 0, bits_filled: 0, lookahead: None, bytes_read: 0 };
        bits.lookahead = bits.next_byte()?;
        Ok(bits)
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Move the lookahead byte into the current register and fetch the next one
    fn advance(&mut self) -> Result<u8> {
        let byte = self.lookahead.ok_or(Error::UnexpectedEof)?;
        self.lookahead = self.next_byte()?;
        Ok(byte)
    }

    /// Read a single bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits_filled == 0 {
            self.current_byte = self.advance()?;
            self.bits_filled = 8;
        }

        let bit = self.current_byte & 0x80 != 0;
        self.current_byte <<= 1;
        self.bits_filled -= 1;
        Ok(bit)
    }

    /// Read a full byte, spanning the current register and the lookahead if unaligned
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.bits_filled == 0 {
            return self.advance();
        }

        let next = self.advance()?;
        let byte = self.current_byte | (next >> self.bits_filled);
        self.current_byte = next << (8 - self.bits_filled);
        Ok(byte)
    }

    /// Read `n` bits (0-32), most significant first
    pub fn read_number(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n <= 32, "Cannot read more than 32 bits at once");

        let mut result = 0u32;
        for _ in 0..n {
            result = (result << 1) | self.read_bit()? as u32;
        }
        Ok(result)
    }

    /// Whether the inner reader has no bytes left beyond the current register
    pub fn is_exhausted(&self) -> bool {
        self.lookahead.is_none()
    }

    /// Bits remaining in the current byte (0-8)
    pub fn bits_filled(&self) -> u8 {
        self.bits_filled
    }

    /// Total bytes pulled from the inner reader, including the lookahead
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Get the inner reader (consumes self)
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits_msb_first() {
        let data = vec![0b1011_0001];
        let mut reader = BitReader::new(data.as_slice()).unwrap();

        let bits: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, vec![true, false, true, true, false, false, false, true]);
    }

    #[test]
    fn test_read_number() {
        let data = vec![0xD3, 0xAA];
        let mut reader = BitReader::new(data.as_slice()).unwrap();

        assert_eq!(reader.read_number(3).unwrap(), 0b110);
        assert_eq!(reader.read_number(5).unwrap(), 0b10011);
        assert_eq!(reader.read_number(8).unwrap(), 0xAA);
    }

    #[test]
    fn test_read_byte_unaligned() {
        let data = vec![0b1011_0100, 0b1000_0000];
        let mut reader = BitReader::new(data.as_slice()).unwrap();

        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_byte().unwrap(), 0b0110_1001);
        assert_eq!(reader.bits_filled(), 7);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_read_byte_aligned() {
        let data = vec![0x12, 0x34];
        let mut reader = BitReader::new(data.as_slice()).unwrap();

        assert_eq!(reader.read_byte().unwrap(), 0x12);
        assert!(!reader.is_exhausted());
        assert_eq!(reader.read_byte().unwrap(), 0x34);
        assert!(reader.is_exhausted());
        assert_eq!(reader.bits_filled(), 0);
    }

    #[test]
    fn test_lookahead_exhaustion() {
        let data = vec![0xFF, 0x00];
        let mut reader = BitReader::new(data.as_slice()).unwrap();
        assert!(!reader.is_exhausted());

        // Loading the first byte pulls the second into the lookahead
        reader.read_bit().unwrap();
        assert!(!reader.is_exhausted());

        for _ in 0..7 {
            reader.read_bit().unwrap();
        }
        reader.read_bit().unwrap();
        assert!(reader.is_exhausted());
        assert_eq!(reader.bits_filled(), 7);
        assert_eq!(reader.bytes_read(), 2);
    }

    #[test]
    fn test_empty_input() {
        let mut reader = BitReader::new(&[][..]).unwrap();
        assert!(reader.is_exhausted());
        assert!(matches!(reader.read_bit(), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = BitReader::new(&[0xA5][..]).unwrap();
        assert_eq!(reader.read_number(8).unwrap(), 0xA5);
        assert!(matches!(reader.read_bit(), Err(Error::UnexpectedEof)));
    }
}
