//! VK4 file header and offset table.
//!
//! # Layout
//!
//! ```text
//! Bytes  0-3:  Magic "VK4_"
//! Bytes  4-7:  DLL version of the writing software
//! Bytes  8-11: File type tag (all zero = normal file)
//! Bytes 12-83: Offset table, 18 little-endian u32 values
//! ```
//!
//! Offset table entries are absolute byte offsets into the file; zero means
//! the section is absent. Entries are not validated here, each section
//! parser checks its own offset against the buffer.

use tracing::debug;

use crate::error::Vk4Error;
use crate::io::Cursor;

use super::{HEADER_SIZE, OFFSET_TABLE_SIZE, VK4_MAGIC};

/// The only file type tag this decoder supports.
const NORMAL_FILE_TYPE: [u8; 4] = [0; 4];

// =============================================================================
// FileType
// =============================================================================

/// Variant declared by the header's file type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Regular measurement file (all-zero tag)
    Normal,

    /// Any other tag; recognised as VK4 but not decodable
    Unsupported([u8; 4]),
}

impl FileType {
    pub fn from_tag(tag: [u8; 4]) -> Self {
        if tag == NORMAL_FILE_TYPE {
            FileType::Normal
        } else {
            FileType::Unsupported(tag)
        }
    }

    /// Get a human-readable name for the file type.
    pub const fn name(&self) -> &'static str {
        match self {
            FileType::Normal => "normal",
            FileType::Unsupported(_) => "unsupported",
        }
    }
}

// =============================================================================
// Vk4Header
// =============================================================================

/// Parsed 12-byte VK4 file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vk4Header {
    pub magic: [u8; 4],
    pub dll_version: [u8; 4],
    pub file_type: [u8; 4],
}

impl Vk4Header {
    /// Parse the header at the cursor position.
    ///
    /// The magic is checked as soon as it is read, so a foreign file is
    /// rejected with `InvalidMagic` before anything else is looked at.
    ///
    /// # Errors
    /// - `InvalidMagic` if the first four bytes are not `VK4_`
    /// - `Truncated` if the buffer does not extend past the header
    /// - `UnsupportedFileType` if the type tag is not all zero
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self, Vk4Error> {
        let magic = cursor.read_array::<4>()?;
        if magic != VK4_MAGIC {
            return Err(Vk4Error::InvalidMagic(magic));
        }

        // Remainder of the header, and at least one byte after it
        cursor.ensure_more_than((HEADER_SIZE - magic.len()) as u64)?;

        let dll_version = cursor.read_array::<4>()?;
        let file_type = cursor.read_array::<4>()?;

        if FileType::from_tag(file_type) != FileType::Normal {
            return Err(Vk4Error::UnsupportedFileType(file_type));
        }

        debug!(dll_version = u32::from_le_bytes(dll_version), "parsed VK4 header");

        Ok(Vk4Header {
            magic,
            dll_version,
            file_type,
        })
    }

    /// DLL version interpreted as a little-endian integer.
    pub fn dll_version_number(&self) -> u32 {
        u32::from_le_bytes(self.dll_version)
    }
}

// =============================================================================
// OffsetTable
// =============================================================================

/// Absolute offsets of the optional sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetTable {
    pub setting: u32,
    pub color_peak: u32,
    pub color_light: u32,
    pub light: [u32; 3],
    pub height: [u32; 3],
    pub color_peak_thumbnail: u32,
    pub color_thumbnail: u32,
    pub light_thumbnail: u32,
    pub height_thumbnail: u32,
    pub assemble: u32,
    pub line_measure: u32,
    pub line_thickness: u32,
    pub string_data: u32,
    pub reserved: u32,
}

impl OffsetTable {
    /// Read the 72-byte offset table at the cursor position.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self, Vk4Error> {
        cursor.ensure_more_than(OFFSET_TABLE_SIZE as u64)?;

        Ok(OffsetTable {
            setting: cursor.read_u32()?,
            color_peak: cursor.read_u32()?,
            color_light: cursor.read_u32()?,
            light: cursor.read_u32_array::<3>()?,
            height: cursor.read_u32_array::<3>()?,
            color_peak_thumbnail: cursor.read_u32()?,
            color_thumbnail: cursor.read_u32()?,
            light_thumbnail: cursor.read_u32()?,
            height_thumbnail: cursor.read_u32()?,
            assemble: cursor.read_u32()?,
            line_measure: cursor.read_u32()?,
            line_thickness: cursor.read_u32()?,
            string_data: cursor.read_u32()?,
            reserved: cursor.read_u32()?,
        })
    }

    /// Whether any false-color (light or height) image is present.
    pub fn has_false_color_images(&self) -> bool {
        self.light.iter().chain(self.height.iter()).any(|&o| o != 0)
    }
}
