use super::checksum::Crc32Reader;
use super::format::{self, TRAILING_FIELD_BITS};
use crate::bits::BitWriter;
use crate::error::{Error, Result};
use crate::huffman::{CodeTable, FrequencyTable, HuffmanTree};
use crate::{CodecConfig, CodecStats};
use std::io::{BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use tracing::debug;

/// Compress `input` into `output`
///
/// The input is read twice: once to count byte frequencies and once to
/// emit codes, so it must be seekable. Empty input writes nothing.
pub fn compress<R: Read + Seek, W: Write>(
    mut input: R,
    output: W,
    config: &CodecConfig,
) -> Result<CodecStats> {
    // Pass 1: frequencies
    let start = input.stream_position()?;
    let mut frequencies = FrequencyTable::new();
    let mut hashing = Crc32Reader::new(&mut input);
    let input_bytes = frequencies.count_reader(&mut hashing, config.buffer_size)?;
    let crc32 = hashing.crc32();
    input.seek(SeekFrom::Start(start))?;

    let tree = match HuffmanTree::from_frequencies(&frequencies)? {
        Some(tree) => tree,
        None => {
            debug!("empty input, nothing to write");
            return Ok(CodecStats { crc32, ..Default::default() });
        }
    };
    let codes = CodeTable::from_tree(&tree)?;

    // Header: tree and trailing-bit count
    let mut writer = BitWriter::new(BufWriter::with_capacity(config.buffer_size, output));
    tree.write_to(&mut writer)?;
    let header_bits = writer.bits_written();
    let payload_bits = codes.payload_bits(&frequencies);
    let trailing = format::trailing_field(header_bits, payload_bits);
    writer.write_number(trailing as u32, TRAILING_FIELD_BITS)?;

    debug!(
        input_bytes,
        symbols = tree.leaf_count(),
        depth = tree.depth(),
        header_bits,
        payload_bits,
        trailing,
        "writing header"
    );

    // Pass 2: payload
    let encoded_bytes = encode_payload(&mut input, &codes, &mut writer, config.buffer_size)?;
    if encoded_bytes != input_bytes {
        return Err(Error::Internal(format!(
            "input changed between passes: counted {} bytes, encoded {}",
            input_bytes, encoded_bytes
        )));
    }

    let padding = writer.write_last()?;
    let output_bytes = writer.bytes_written();
    writer.finish()?;
    debug!(output_bytes, padding, "compression complete");

    Ok(CodecStats {
        input_bytes,
        output_bytes,
        distinct_symbols: tree.leaf_count(),
        header_bits,
        payload_bits,
        trailing_bits: format::meaningful_bits(trailing),
        crc32,
    })
}

fn encode_payload<R: Read, W: Write>(
    input: &mut R,
    codes: &CodeTable,
    writer: &mut BitWriter<W>,
    chunk_size: usize,
) -> Result<u64> {
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = match input.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        };
        for &byte in &buffer[..n] {
            codes.encode_byte(byte, writer)?;
        }
        total += n as u64;
    }
}
