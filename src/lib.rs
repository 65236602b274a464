//! Static Huffman compression over the 256 byte values.
//!
//! The compressed format stores the code tree itself, so decoders need no
//! out-of-band tables. See [`codec::format`] for the layout.

pub mod bits;
pub mod codec;
pub mod error;
pub mod huffman;

pub use codec::{compress, decompress, verify};
pub use error::{Error, Result};
pub use huffman::{CodeTable, FrequencyTable, HuffmanTree};

use std::io::{Cursor, Read, Seek, Write};

/// Configuration for compression and decompression
#[derive(Clone, Debug)]
pub struct CodecConfig {
    /// Buffer size for I/O operations and frequency counting
    pub buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { buffer_size: 128 * 1024 }
    }
}

/// Statistics from a compression or decompression run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodecStats {
    /// Bytes consumed from the input
    pub input_bytes: u64,
    /// Bytes written to the output
    pub output_bytes: u64,
    /// Leaves in the code tree
    pub distinct_symbols: usize,
    /// Serialized tree size in bits
    pub header_bits: u64,
    /// Encoded payload size in bits
    pub payload_bits: u64,
    /// Meaningful bits in the final compressed byte (1-8, 0 for empty streams)
    pub trailing_bits: u8,
    /// CRC32 of the uncompressed data
    pub crc32: u32,
}

/// Trait for the complete compression round trip
pub trait Codec {
    /// Compress `input` into `output`
    fn compress<R: Read + Seek, W: Write>(&mut self, input: R, output: W) -> Result<CodecStats>;

    /// Decompress `input` into `output`
    fn decompress<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<CodecStats>;
}

/// Huffman codec implementation
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl Codec for HuffmanCodec {
    fn compress<R: Read + Seek, W: Write>(&mut self, input: R, output: W) -> Result<CodecStats> {
        codec::compress(input, output, &self.config)
    }

    fn decompress<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<CodecStats> {
        codec::decompress(input, output, &self.config)
    }
}

/// Compress an in-memory buffer
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    HuffmanCodec::default().compress(Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Decompress an in-memory buffer
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    HuffmanCodec::default().decompress(data, &mut output)?;
    Ok(output)
}
