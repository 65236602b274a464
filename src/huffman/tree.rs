use super::frequency::FrequencyTable;
use super::queue::PriorityQueue;
use crate::bits::{sequence, BitReader, BitWriter};
use crate::error::{Error, Result};
use std::io::{Read, Write};
use tracing::trace;

/// Deepest nesting accepted when reading a serialized tree
///
/// A tree over 256 symbols is at most 255 levels deep; anything deeper can
/// only come from a corrupt header.
pub const MAX_TREE_DEPTH: usize = sequence::MAX_SIZE;

/// Huffman tree node. Each internal node exclusively owns both children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf(u8),
    Internal { left: Box<Node>, right: Box<Node> },
}

impl Node {
    pub fn internal(left: Node, right: Node) -> Self {
        Node::Internal { left: Box::new(left), right: Box::new(right) }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Follow one edge: `true` goes right, `false` goes left
    ///
    /// Returns `None` on a leaf.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal { left, right } => Some(if bit { right } else { left }),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal { left, right } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal { left, right } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Preorder: leaf = `1` + 8-bit value, internal = `0` + left + right
    fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        match self {
            Node::Leaf(value) => {
                writer.write_bit(true)?;
                writer.write_byte(*value)
            }
            Node::Internal { left, right } => {
                writer.write_bit(false)?;
                left.write_to(writer)?;
                right.write_to(writer)
            }
        }
    }

    fn read_from<R: Read>(reader: &mut BitReader<R>, depth: usize) -> Result<Node> {
        if depth > MAX_TREE_DEPTH {
            return Err(Error::InvalidTree(format!("nesting exceeds {} levels", MAX_TREE_DEPTH)));
        }

        if reader.read_bit()? {
            Ok(Node::Leaf(reader.read_byte()?))
        } else {
            let left = Node::read_from(reader, depth + 1)?;
            let right = Node::read_from(reader, depth + 1)?;
            Ok(Node::internal(left, right))
        }
    }
}

/// Binary prefix-code tree over byte values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Build a tree by repeatedly merging the two lightest subtrees
    ///
    /// The first subtree dequeued becomes the left child. Returns `None`
    /// when no symbol occurs.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Option<Self>> {
        let mut queue = PriorityQueue::with_capacity(frequencies.distinct_symbols());
        for (byte, count) in frequencies.symbols() {
            queue.enqueue(Node::Leaf(byte), count);
        }

        if queue.is_empty() {
            return Ok(None);
        }

        while queue.len() > 1 {
            let (left, left_weight) = queue.dequeue()?;
            let (right, right_weight) = queue.dequeue()?;
            let weight = left_weight + right_weight;
            trace!(left_weight, right_weight, weight, "merging subtrees");
            queue.enqueue(Node::internal(left, right), weight);
        }

        let (root, _) = queue.dequeue()?;
        Ok(Some(Self { root }))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Option<Self>> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Size of the serialized header in bits
    pub fn serialized_bits(&self) -> u64 {
        // 9 bits per leaf plus one tag bit per internal node (leaves - 1)
        let leaves = self.leaf_count() as u64;
        10 * leaves - 1
    }

    /// Serialize the tree in preorder
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        self.root.write_to(writer)
    }

    /// Deserialize a tree written by [`HuffmanTree::write_to`]
    pub fn read_from<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        Ok(Self { root: Node::read_from(reader, 0)? })
    }
}
