use crate::error::{Error, Result};
use std::io::{ErrorKind, Read};

/// Number of distinct byte values
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for every byte value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self { counts: [0; ALPHABET_SIZE] }
    }

    /// Count frequencies from a byte slice
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.count_bytes(data);
        table
    }

    /// Count every byte of `reader` until end of input, reading `chunk_size` bytes at a time
    ///
    /// Returns the number of bytes consumed.
    pub fn count_reader<R: Read>(&mut self, reader: &mut R, chunk_size: usize) -> Result<u64> {
        let mut buffer = vec![0u8; chunk_size.max(1)];
        let mut total = 0u64;

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => return Ok(total),
                Ok(n) => {
                    self.count_bytes(&buffer[..n]);
                    total += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    pub fn count_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Byte values with nonzero count, in ascending byte order
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate().filter(|(_, &count)| count > 0).map(|(b, &count)| (b as u8, count))
    }

    /// Number of byte values that occur at least once
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_bytes() {
        let table = FrequencyTable::from_bytes(b"AAAAAAAAB");
        assert_eq!(table.get(b'A'), 8);
        assert_eq!(table.get(b'B'), 1);
        assert_eq!(table.get(b'C'), 0);
        assert_eq!(table.distinct_symbols(), 2);
        assert_eq!(table.total(), 9);
    }

    #[test]
    fn test_symbols_in_byte_order() {
        let table = FrequencyTable::from_bytes(b"zyxzz");
        let symbols: Vec<(u8, u64)> = table.symbols().collect();
        assert_eq!(symbols, vec![(b'x', 1), (b'y', 1), (b'z', 3)]);
    }

    #[test]
    fn test_count_reader_small_chunks() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let mut table = FrequencyTable::new();
        let consumed = table.count_reader(&mut Cursor::new(&data), 7).unwrap();

        assert_eq!(consumed, 1000);
        assert_eq!(table, FrequencyTable::from_bytes(&data));
        assert_eq!(table.distinct_symbols(), 256);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.symbols().count(), 0);
    }
}
