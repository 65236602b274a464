pub mod checksum;
pub mod compress;
pub mod decompress;
pub mod format;
pub mod verify;

pub use checksum::{Crc32Reader, Crc32Writer};
pub use compress::compress;
pub use decompress::decompress;
pub use verify::verify;
