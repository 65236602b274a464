use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Bit sequence errors
    #[error("Bit sequence overflow: capacity of {capacity} bits exhausted")]
    BitsetOverflow { capacity: usize },

    #[error("Bit position {pos} out of range for sequence of {size} bits")]
    IndexOutOfRange { pos: usize, size: usize },

    // Tree construction errors
    #[error("Priority queue underflow")]
    QueueUnderflow,

    #[error("Invalid Huffman tree header: {0}")]
    InvalidTree(String),

    #[error("No code assigned to byte 0x{0:02x}")]
    MissingCode(u8),

    // Verification errors
    #[error("CRC32 mismatch: expected 0x{expected:08x}, got 0x{found:08x}")]
    Crc32Mismatch { expected: u32, found: u32 },

    #[error("Size mismatch: expected {expected} bytes, got {found}")]
    SizeMismatch { expected: u64, found: u64 },

    // Internal errors
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
