use super::checksum::Crc32Writer;
use super::format::{self, TRAILING_FIELD_BITS};
use crate::bits::BitReader;
use crate::error::{Error, Result};
use crate::huffman::{HuffmanTree, Node};
use crate::{CodecConfig, CodecStats};
use std::io::{BufReader, BufWriter, Read, Write};
use tracing::debug;

/// Decompress `input` into `output`
///
/// Empty input writes nothing.
pub fn decompress<R: Read, W: Write>(
    input: R,
    output: W,
    config: &CodecConfig,
) -> Result<CodecStats> {
    let mut reader = BitReader::new(BufReader::with_capacity(config.buffer_size, input))?;
    if reader.is_exhausted() {
        debug!("empty input, nothing to write");
        return Ok(CodecStats::default());
    }

    let tree = HuffmanTree::read_from(&mut reader)?;
    let stored = reader.read_number(TRAILING_FIELD_BITS)? as u8;
    let trailing_bits = format::meaningful_bits(stored);

    debug!(symbols = tree.leaf_count(), depth = tree.depth(), trailing_bits, "read header");

    let mut writer = Crc32Writer::new(BufWriter::with_capacity(config.buffer_size, output));
    let payload_bits = decode_payload(&mut reader, &tree, trailing_bits, &mut writer)?;
    writer.flush()?;

    let stats = CodecStats {
        input_bytes: reader.bytes_read(),
        output_bytes: writer.bytes_written(),
        distinct_symbols: tree.leaf_count(),
        header_bits: tree.serialized_bits(),
        payload_bits,
        trailing_bits,
        crc32: writer.crc32(),
    };
    debug!(output_bytes = stats.output_bytes, "decompression complete");
    Ok(stats)
}

/// Walk the tree bit by bit until the end of the payload
///
/// The payload ends once the lookahead is exhausted and exactly
/// `8 - trailing_bits` padding bits remain in the final byte. A root that
/// is itself a leaf emits its symbol once per bit.
fn decode_payload<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    tree: &HuffmanTree,
    trailing_bits: u8,
    output: &mut W,
) -> Result<u64> {
    let root = tree.root();
    let padding = 8 - trailing_bits;
    let mut node = root;
    let mut bits = 0u64;

    while !(reader.is_exhausted() && reader.bits_filled() == padding) {
        let bit = reader.read_bit()?;
        bits += 1;

        if let Some(next) = node.child(bit) {
            node = next;
        }
        if let Node::Leaf(byte) = node {
            output.write_all(&[*byte])?;
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(Error::InvalidTree("payload ends inside a code".to_string()));
    }
    Ok(bits)
}
