//! Container layout
//!
//! A compressed stream is a single MSB-first bit string with no alignment
//! between fields:
//!
//! 1. the Huffman tree in preorder (`1` + 8-bit byte per leaf, `0` per internal node)
//! 2. a 3-bit count of meaningful bits in the final byte (stored 0 means 8)
//! 3. the concatenated codes of every input byte
//! 4. zero padding up to the next byte boundary
//!
//! Empty input compresses to an empty stream.

/// Width of the trailing-bit-count field
pub const TRAILING_FIELD_BITS: u8 = 3;

/// Value stored in the trailing-bit-count field
///
/// This is the total stream length modulo 8, i.e. how many bits of the
/// final byte carry data (0 when the final byte is full).
pub fn trailing_field(header_bits: u64, payload_bits: u64) -> u8 {
    let total = header_bits.wrapping_add(TRAILING_FIELD_BITS as u64).wrapping_add(payload_bits);
    (total % 8) as u8
}

/// Meaningful bits in the final byte for a stored field value (1-8)
pub fn meaningful_bits(stored: u8) -> u8 {
    match stored & 0b111 {
        0 => 8,
        n => n,
    }
}

/// Zero bits appended after `total_bits` of data
pub fn padding_bits(total_bits: u64) -> u8 {
    ((8 - total_bits % 8) % 8) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_field() {
        // 19-bit header + 3-bit field + 9-bit payload = 31 bits
        assert_eq!(trailing_field(19, 9), 7);
        // 19 + 3 + 10 = 32 bits: final byte full
        assert_eq!(trailing_field(19, 10), 0);
        assert_eq!(trailing_field(9, 1), 5);
    }

    #[test]
    fn test_trailing_field_wrapping() {
        // Wrapped payload totals keep the right residue
        assert_eq!(trailing_field(9, u64::MAX), ((9u128 + 3 + u64::MAX as u128) % 8) as u8);
    }

    #[test]
    fn test_meaningful_bits() {
        assert_eq!(meaningful_bits(0), 8);
        for n in 1..8 {
            assert_eq!(meaningful_bits(n), n);
        }
    }

    #[test]
    fn test_padding_complements_field() {
        for total in 0..64u64 {
            let stored = (total % 8) as u8;
            assert_eq!(padding_bits(total), (8 - meaningful_bits(stored)) % 8);
        }
    }
}
