//! Decode orchestration.
//!
//! The leading sections (header, offset table, measurement conditions) are
//! read sequentially from the start of the buffer. Every other section is
//! reached by seeking to its offset table entry. Any error aborts the whole
//! decode; a partially decoded document is never returned.

use tracing::debug;

use crate::error::{Section, Vk4Error};
use crate::io::Cursor;

use super::assembly::Assembly;
use super::conditions::MeasurementConditions;
use super::header::{OffsetTable, Vk4Header};
use super::image::{FalseColorImage, TrueColorImage};
use super::line::LineMeasurement;
use super::strings::CharacterStrings;

/// A fully decoded VK4 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vk4Document {
    pub header: Vk4Header,
    pub offset_table: OffsetTable,
    pub conditions: MeasurementConditions,
    pub assembly: Option<Assembly>,
    pub color_peak: Option<TrueColorImage>,
    pub color_light: Option<TrueColorImage>,
    pub light: [Option<FalseColorImage>; 3],
    pub height: [Option<FalseColorImage>; 3],
    pub line_measurement: Option<LineMeasurement>,
    pub strings: Option<CharacterStrings>,
    image_count: u32,
}

impl Vk4Document {
    /// Number of false-color images decoded. At least 1 for any document
    /// returned by [`decode`].
    pub fn image_count(&self) -> u32 {
        self.image_count
    }

    /// Populated false-color channels, light channels first.
    pub fn false_color_images(&self) -> impl Iterator<Item = (Section, &FalseColorImage)> {
        let light = self
            .light
            .iter()
            .enumerate()
            .filter_map(|(i, img)| img.as_ref().map(|img| (Section::Light(i), img)));
        let height = self
            .height
            .iter()
            .enumerate()
            .filter_map(|(i, img)| img.as_ref().map(|img| (Section::Height(i), img)));
        light.chain(height)
    }

    /// Populated true-color images.
    pub fn true_color_images(&self) -> impl Iterator<Item = (Section, &TrueColorImage)> {
        [
            (Section::ColorPeak, self.color_peak.as_ref()),
            (Section::ColorLight, self.color_light.as_ref()),
        ]
        .into_iter()
        .filter_map(|(section, img)| img.map(|img| (section, img)))
    }
}

/// Decode a complete VK4 file held in memory.
///
/// # Errors
/// Returns the first error encountered in any section, or
/// `Vk4Error::NoImageData` if the file contains no false-color image.
pub fn decode(data: &[u8]) -> Result<Vk4Document, Vk4Error> {
    let mut cursor = Cursor::new(data);

    let header = Vk4Header::parse(&mut cursor)?;
    let offset_table = OffsetTable::parse(&mut cursor)?;
    let conditions = MeasurementConditions::parse(&mut cursor)?;

    let assembly = match offset_table.assemble {
        0 => None,
        offset => Some(Assembly::parse(&mut cursor, offset)?),
    };

    let mut image_count = 0u32;
    let mut light: [Option<FalseColorImage>; 3] = Default::default();
    let mut height: [Option<FalseColorImage>; 3] = Default::default();

    for (i, slot) in light.iter_mut().enumerate() {
        *slot = FalseColorImage::parse(&mut cursor, Section::Light(i), offset_table.light[i])?;
        image_count += u32::from(slot.is_some());
    }
    for (i, slot) in height.iter_mut().enumerate() {
        *slot = FalseColorImage::parse(&mut cursor, Section::Height(i), offset_table.height[i])?;
        image_count += u32::from(slot.is_some());
    }

    let color_peak = TrueColorImage::parse(&mut cursor, Section::ColorPeak, offset_table.color_peak)?;
    let color_light =
        TrueColorImage::parse(&mut cursor, Section::ColorLight, offset_table.color_light)?;

    let line_measurement = match offset_table.line_measure {
        0 => None,
        offset => Some(LineMeasurement::parse(&mut cursor, offset)?),
    };

    let strings = match offset_table.string_data {
        0 => None,
        offset => Some(CharacterStrings::parse(&mut cursor, offset)?),
    };

    if image_count == 0 {
        return Err(Vk4Error::NoImageData);
    }

    debug!(
        size = data.len(),
        image_count,
        has_assembly = assembly.is_some(),
        has_line_measurement = line_measurement.is_some(),
        "decoded VK4 document"
    );

    Ok(Vk4Document {
        header,
        offset_table,
        conditions,
        assembly,
        color_peak,
        color_light,
        light,
        height,
        line_measurement,
        strings,
        image_count,
    })
}
