use super::frequency::{FrequencyTable, ALPHABET_SIZE};
use super::tree::{HuffmanTree, Node};
use crate::bits::{BitSequence, BitWriter};
use crate::error::{Error, Result};
use std::io::Write;

/// Huffman code for every byte value; unused bytes have an empty code
pub struct CodeTable {
    codes: Box<[BitSequence; ALPHABET_SIZE]>,
}

impl CodeTable {
    /// Derive codes by walking the tree (right edge = 1, left edge = 0)
    ///
    /// A tree whose root is a leaf gives that symbol the one-bit code `1`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self { codes: Box::new(std::array::from_fn(|_| BitSequence::new())) };
        let mut path = BitSequence::new();
        table.walk(tree.root(), &mut path)?;
        Ok(table)
    }

    fn walk(&mut self, node: &Node, path: &mut BitSequence) -> Result<()> {
        match node {
            Node::Leaf(byte) => {
                let mut code = BitSequence::new();
                if path.is_empty() {
                    code.append_bit(true)?;
                } else {
                    code.copy_from(path)?;
                }
                self.codes[*byte as usize] = code;
            }
            Node::Internal { left, right } => {
                path.append_bit(true)?;
                self.walk(right, path)?;
                path.pop_bit();

                path.append_bit(false)?;
                self.walk(left, path)?;
                path.pop_bit();
            }
        }
        Ok(())
    }

    pub fn get(&self, byte: u8) -> &BitSequence {
        &self.codes[byte as usize]
    }

    /// Bytes that have a code, with their codes, in byte order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSequence)> + '_ {
        self.codes.iter().enumerate().filter(|(_, code)| !code.is_empty()).map(|(b, code)| (b as u8, code))
    }

    /// Emit the code for `byte`
    #[inline]
    pub fn encode_byte<W: Write>(&self, byte: u8, writer: &mut BitWriter<W>) -> Result<()> {
        let code = &self.codes[byte as usize];
        if code.is_empty() {
            return Err(Error::MissingCode(byte));
        }
        code.emit_to(writer)
    }

    /// Payload length in bits for input with the given frequencies
    ///
    /// Wraps on overflow; the low bits stay exact, which is all the
    /// trailing-bit count needs.
    pub fn payload_bits(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter().fold(0u64, |total, (byte, code)| {
            total.wrapping_add(frequencies.get(byte).wrapping_mul(code.len() as u64))
        })
    }
}
