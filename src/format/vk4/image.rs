//! False-color and true-color image sections.
//!
//! Both image kinds share one header shape and one validation routine,
//! parameterised by an [`ImageLayout`]:
//!
//! ```text
//! width u32, height u32, bit_depth u32, compression u32, byte_size u32
//! [false-color only] palette_range_min u32, palette_range_max u32, palette [u8; 768]
//! pixel data [u8; byte_size]
//! ```
//!
//! Validation happens in read order: each dimension as soon as it is read,
//! then the bit depth, then `byte_size` against the geometry (exact match),
//! and finally the payload length against what the buffer still holds.

use bytes::Bytes;
use tracing::debug;

use crate::error::{Section, Vk4Error};
use crate::io::Cursor;

use super::{
    locate_section, FALSE_COLOR_IMAGE_MIN_SIZE, MAX_DIMENSION, PALETTE_SIZE,
    TRUE_COLOR_IMAGE_MIN_SIZE,
};

// =============================================================================
// ImageLayout
// =============================================================================

/// Capabilities that distinguish the two image kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLayout {
    /// Accepted values for the bit depth field
    pub allowed_bit_depths: &'static [u32],
    /// Whether a palette follows the fixed header fields
    pub has_palette: bool,
}

impl ImageLayout {
    /// Palette-mapped single channel (light intensity or height).
    pub const FALSE_COLOR: ImageLayout = ImageLayout {
        allowed_bit_depths: &[8, 16, 32],
        has_palette: true,
    };

    /// 24-bit RGB composite.
    pub const TRUE_COLOR: ImageLayout = ImageLayout {
        allowed_bit_depths: &[24],
        has_palette: false,
    };

    /// Size of the section header preceding the pixel data.
    pub const fn header_size(&self) -> usize {
        if self.has_palette {
            FALSE_COLOR_IMAGE_MIN_SIZE
        } else {
            TRUE_COLOR_IMAGE_MIN_SIZE
        }
    }
}

// =============================================================================
// Image types
// =============================================================================

/// Palette attached to a false-color image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub range_min: u32,
    pub range_max: u32,
    /// 256 RGB triplets
    pub table: [u8; PALETTE_SIZE],
}

/// Single-channel palette-mapped raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FalseColorImage {
    pub width: u32,
    pub height: u32,
    /// 8, 16 or 32
    pub bit_depth: u32,
    pub compression: u32,
    pub byte_size: u32,
    pub palette: Palette,
    /// Raw little-endian samples, row-major
    pub data: Bytes,
}

/// 24-bit RGB raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueColorImage {
    pub width: u32,
    pub height: u32,
    /// Always 24
    pub bit_depth: u32,
    pub compression: u32,
    pub byte_size: u32,
    pub data: Bytes,
}

impl FalseColorImage {
    /// Parse a false-color image at `offset`. Returns `None` when the offset is 0.
    pub fn parse(
        cursor: &mut Cursor<'_>,
        section: Section,
        offset: u32,
    ) -> Result<Option<Self>, Vk4Error> {
        let Some(header) = read_image_header(cursor, section, offset, ImageLayout::FALSE_COLOR)?
        else {
            return Ok(None);
        };

        let palette = Palette {
            range_min: cursor.read_u32()?,
            range_max: cursor.read_u32()?,
            table: cursor.read_array::<PALETTE_SIZE>()?,
        };
        let data = read_payload(cursor, section, offset, &header)?;

        Ok(Some(FalseColorImage {
            width: header.width,
            height: header.height,
            bit_depth: header.bit_depth,
            compression: header.compression,
            byte_size: header.byte_size,
            palette,
            data,
        }))
    }

    pub fn bytes_per_sample(&self) -> usize {
        (self.bit_depth / 8) as usize
    }
}

impl TrueColorImage {
    /// Parse a true-color image at `offset`. Returns `None` when the offset is 0.
    pub fn parse(
        cursor: &mut Cursor<'_>,
        section: Section,
        offset: u32,
    ) -> Result<Option<Self>, Vk4Error> {
        let Some(header) = read_image_header(cursor, section, offset, ImageLayout::TRUE_COLOR)?
        else {
            return Ok(None);
        };

        let data = read_payload(cursor, section, offset, &header)?;

        Ok(Some(TrueColorImage {
            width: header.width,
            height: header.height,
            bit_depth: header.bit_depth,
            compression: header.compression,
            byte_size: header.byte_size,
            data,
        }))
    }

    pub fn bytes_per_sample(&self) -> usize {
        (self.bit_depth / 8) as usize
    }
}

// =============================================================================
// Shared decoding
// =============================================================================

/// Validated fixed fields common to both image kinds.
struct ImageHeader {
    width: u32,
    height: u32,
    bit_depth: u32,
    compression: u32,
    byte_size: u32,
}

fn read_dimension(
    cursor: &mut Cursor<'_>,
    section: Section,
    axis: &'static str,
) -> Result<u32, Vk4Error> {
    let value = cursor.read_u32()?;
    if !(1..=MAX_DIMENSION).contains(&value) {
        return Err(Vk4Error::InvalidDimension {
            section,
            axis,
            value,
        });
    }
    Ok(value)
}

/// Locate the section and validate its geometry.
///
/// Leaves the cursor right after `byte_size`; for palette-bearing layouts
/// the caller reads the palette next. The whole header (palette included)
/// is known to fit once this returns.
fn read_image_header(
    cursor: &mut Cursor<'_>,
    section: Section,
    offset: u32,
    layout: ImageLayout,
) -> Result<Option<ImageHeader>, Vk4Error> {
    if offset == 0 {
        return Ok(None);
    }

    locate_section(cursor, section, offset, layout.header_size())?;

    let width = read_dimension(cursor, section, "width")?;
    let height = read_dimension(cursor, section, "height")?;

    let bit_depth = cursor.read_u32()?;
    if !layout.allowed_bit_depths.contains(&bit_depth) {
        return Err(Vk4Error::UnsupportedBitDepth { section, bit_depth });
    }
    let bytes_per_sample = u64::from(bit_depth / 8);

    let compression = cursor.read_u32()?;
    let byte_size = cursor.read_u32()?;

    let expected = u64::from(width) * u64::from(height) * bytes_per_sample;
    if expected != u64::from(byte_size) {
        return Err(Vk4Error::SizeMismatch {
            section,
            expected,
            declared: byte_size,
        });
    }

    Ok(Some(ImageHeader {
        width,
        height,
        bit_depth,
        compression,
        byte_size,
    }))
}

/// Copy the pixel payload that follows the section header.
fn read_payload(
    cursor: &mut Cursor<'_>,
    section: Section,
    offset: u32,
    header: &ImageHeader,
) -> Result<Bytes, Vk4Error> {
    let data = cursor.read_bytes(header.byte_size as usize)?;

    debug!(
        %section,
        offset,
        width = header.width,
        height = header.height,
        bit_depth = header.bit_depth,
        byte_size = header.byte_size,
        "decoded image"
    );

    Ok(data)
}
