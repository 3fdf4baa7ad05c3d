//! Keyence VK4 profilometry file decoder.
//!
//! # File Structure
//!
//! ```text
//! ┌──────────────────────────────┐ 0
//! │ Header (12 bytes)            │
//! ├──────────────────────────────┤ 12
//! │ Offset table (72 bytes)      │──┐ absolute offsets, 0 = absent
//! ├──────────────────────────────┤  │
//! │ Measurement conditions       │  │
//! │ (self-sized, >= 304 bytes)   │  │
//! ├──────────────────────────────┤  │
//! │ Optional sections, anywhere: │◄─┘
//! │ assembly, light[3],          │
//! │ height[3], color peak/light, │
//! │ line measurement, strings    │
//! └──────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Since every section is addressed by an
//! offset taken from the file itself, each parser validates its offset and
//! every declared size against the buffer before reading.

mod assembly;
mod conditions;
mod document;
mod header;
mod image;
mod line;
mod strings;

pub use assembly::{Assembly, AssemblyConditions, AssemblyFile, AssemblyFileType, AssemblyInfo};
pub use conditions::MeasurementConditions;
pub use document::{decode, Vk4Document};
pub use header::{FileType, OffsetTable, Vk4Header};
pub use image::{FalseColorImage, ImageLayout, Palette, TrueColorImage};
pub use line::LineMeasurement;
pub use strings::CharacterStrings;

use crate::error::{Section, Vk4Error};
use crate::io::Cursor;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes at the start of every VK4 file.
pub const VK4_MAGIC: [u8; 4] = *b"VK4_";

pub const HEADER_SIZE: usize = 12;
pub const OFFSET_TABLE_SIZE: usize = 72;
pub const MEASUREMENT_CONDITIONS_MIN_SIZE: usize = 304;
pub const ASSEMBLY_INFO_SIZE: usize = 16;
pub const ASSEMBLY_CONDITIONS_SIZE: usize = 8;
pub const ASSEMBLY_HEADERS_SIZE: usize = ASSEMBLY_INFO_SIZE + ASSEMBLY_CONDITIONS_SIZE;
pub const ASSEMBLY_FILE_SIZE: usize = 532;
/// UTF-16 code units in an assembly file name
pub const ASSEMBLY_FILE_NAME_LEN: usize = 260;
pub const TRUE_COLOR_IMAGE_MIN_SIZE: usize = 20;
pub const FALSE_COLOR_IMAGE_MIN_SIZE: usize = 796;
pub const PALETTE_SIZE: usize = 0x300;
/// Samples per line measurement channel
pub const LINE_MEASUREMENT_LEN: usize = 1024;
pub const LINE_MEASUREMENT_SIZE: usize = 18440;
/// Largest accepted image width or height
pub const MAX_DIMENSION: u32 = 1 << 16;

/// Seek to an optional section after checking it has `min_size` bytes of room.
///
/// A section that ends exactly at the end of the buffer is accepted.
fn locate_section(
    cursor: &mut Cursor<'_>,
    section: Section,
    offset: u32,
    min_size: usize,
) -> Result<(), Vk4Error> {
    let size = cursor.len() as u64;
    let offset = u64::from(offset);
    let required = min_size as u64;

    if size <= required || offset > size - required {
        return Err(Vk4Error::SectionOutOfBounds {
            section,
            offset,
            required,
            size,
        });
    }

    cursor.seek(offset)
}
