use super::decompress;
use crate::error::{Error, Result};
use crate::{CodecConfig, CodecStats};
use std::io::{self, Read};
use tracing::debug;

/// Decode `compressed` without keeping the output and check it against the
/// statistics recorded when it was compressed
pub fn verify<R: Read>(compressed: R, expected: &CodecStats, config: &CodecConfig) -> Result<CodecStats> {
    let stats = decompress(compressed, io::sink(), config)?;

    if stats.output_bytes != expected.input_bytes {
        return Err(Error::SizeMismatch { expected: expected.input_bytes, found: stats.output_bytes });
    }
    if stats.crc32 != expected.crc32 {
        return Err(Error::Crc32Mismatch { expected: expected.crc32, found: stats.crc32 });
    }

    debug!(bytes = stats.output_bytes, crc32 = stats.crc32, "verified round trip");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compress;
    use std::io::Cursor;

    fn compressed(data: &[u8]) -> (Vec<u8>, CodecStats) {
        let mut output = Vec::new();
        let stats = compress(Cursor::new(data), &mut output, &CodecConfig::default()).unwrap();
        (output, stats)
    }

    #[test]
    fn test_verify_ok() {
        let (output, stats) = compressed(b"verify this stream of bytes");
        let checked = verify(output.as_slice(), &stats, &CodecConfig::default()).unwrap();
        assert_eq!(checked.crc32, stats.crc32);
    }

    #[test]
    fn test_verify_detects_crc_mismatch() {
        let (output, mut stats) = compressed(b"verify this stream of bytes");
        stats.crc32 ^= 1;
        assert!(matches!(
            verify(output.as_slice(), &stats, &CodecConfig::default()),
            Err(Error::Crc32Mismatch { .. })
        ));
    }

    #[test]
    fn test_verify_detects_size_mismatch() {
        let (output, mut stats) = compressed(b"abc");
        stats.input_bytes = 4;
        assert!(matches!(
            verify(output.as_slice(), &stats, &CodecConfig::default()),
            Err(Error::SizeMismatch { expected: 4, found: 3 })
        ));
    }
}
