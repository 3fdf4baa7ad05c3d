//! Line measurement section.
//!
//! Fixed 18440-byte layout: size u32, line width u32, then three light
//! channels of 1024 u16 samples and three height channels of 1024 u32
//! samples. The declared line width does not change how much is read; only
//! the first channel of each kind carries data, the others are reserved.

use bytes::Bytes;
use tracing::debug;

use crate::error::{Section, Vk4Error};
use crate::io::{read_u16_le, read_u32_le, Cursor};

use super::{locate_section, LINE_MEASUREMENT_LEN, LINE_MEASUREMENT_SIZE};

/// Byte length of one light channel.
const LIGHT_CHANNEL_BYTES: usize = LINE_MEASUREMENT_LEN * 2;

/// Byte length of one height channel.
const HEIGHT_CHANNEL_BYTES: usize = LINE_MEASUREMENT_LEN * 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMeasurement {
    pub size: u32,
    pub line_width: u32,
    /// Raw little-endian u16 samples per channel
    pub light: [Bytes; 3],
    /// Raw little-endian u32 samples per channel
    pub height: [Bytes; 3],
}

impl LineMeasurement {
    /// Parse the line measurement section at `offset`.
    pub fn parse(cursor: &mut Cursor<'_>, offset: u32) -> Result<Self, Vk4Error> {
        locate_section(
            cursor,
            Section::LineMeasurement,
            offset,
            LINE_MEASUREMENT_SIZE,
        )?;

        let size = cursor.read_u32()?;
        let line_width = cursor.read_u32()?;

        let light = [
            cursor.read_bytes(LIGHT_CHANNEL_BYTES)?,
            cursor.read_bytes(LIGHT_CHANNEL_BYTES)?,
            cursor.read_bytes(LIGHT_CHANNEL_BYTES)?,
        ];
        let height = [
            cursor.read_bytes(HEIGHT_CHANNEL_BYTES)?,
            cursor.read_bytes(HEIGHT_CHANNEL_BYTES)?,
            cursor.read_bytes(HEIGHT_CHANNEL_BYTES)?,
        ];

        debug!(offset, size, line_width, "parsed line measurement");

        Ok(LineMeasurement {
            size,
            line_width,
            light,
            height,
        })
    }

    /// Samples of the first (meaningful) light channel.
    pub fn light_profile(&self) -> Vec<u16> {
        self.light[0].chunks_exact(2).map(read_u16_le).collect()
    }

    /// Samples of the first (meaningful) height channel.
    pub fn height_profile(&self) -> Vec<u32> {
        self.height[0].chunks_exact(4).map(read_u32_le).collect()
    }
}
