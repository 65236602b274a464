pub mod codes;
pub mod frequency;
pub mod queue;
pub mod tree;

pub use codes::CodeTable;
pub use frequency::{FrequencyTable, ALPHABET_SIZE};
pub use queue::PriorityQueue;
pub use tree::{HuffmanTree, Node};
