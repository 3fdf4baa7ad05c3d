mod cursor;
mod local_reader;
mod range_reader;

pub use cursor::Cursor;
pub use local_reader::{LocalFileReader, MemoryReader};
pub use range_reader::{read_i32_le, read_u16_le, read_u32_le, RangeReader};
