//! Serializable overview of a decoded VK4 document.
//!
//! Raw pixel payloads and palettes are left out; the summary carries what a
//! person inspecting a file wants to see at a glance, and is what
//! `vk4-inspect` prints.

use std::fmt;

use serde::Serialize;

use crate::format::vk4::{AssemblyFile, MeasurementConditions, Vk4Document};

/// Geometry of one decoded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    /// Section the image was decoded from (e.g., "light[0]", "color peak")
    pub section: String,

    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,

    /// Payload size in bytes
    pub byte_size: u32,
}

/// Stitching metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblySummary {
    pub count_x: u16,
    pub count_y: u16,

    /// Source file names, one per tile
    pub files: Vec<String>,
}

/// Summary of a decoded VK4 document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub dll_version: u32,

    /// Acquisition time as "YYYY-MM-DD hh:mm:ss"
    pub acquired_at: String,

    /// Offset from UTC in minutes
    pub utc_offset_minutes: i32,

    pub lens_magnification: u32,

    /// Picometres per pixel along X
    pub x_length_per_pixel: u32,

    /// Picometres per pixel along Y
    pub y_length_per_pixel: u32,

    /// Picometres per height digit
    pub z_length_per_digit: u32,

    pub image_count: u32,
    pub images: Vec<ImageSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<AssemblySummary>,

    pub has_line_measurement: bool,
    pub title: String,
    pub lens_name: String,
}

impl DocumentSummary {
    pub fn from_document(doc: &Vk4Document) -> Self {
        let mut images: Vec<ImageSummary> = doc
            .false_color_images()
            .map(|(section, img)| ImageSummary {
                section: section.to_string(),
                width: img.width,
                height: img.height,
                bit_depth: img.bit_depth,
                byte_size: img.byte_size,
            })
            .collect();
        images.extend(doc.true_color_images().map(|(section, img)| ImageSummary {
            section: section.to_string(),
            width: img.width,
            height: img.height,
            bit_depth: img.bit_depth,
            byte_size: img.byte_size,
        }));

        let assembly = doc.assembly.as_ref().map(|assembly| AssemblySummary {
            count_x: assembly.conditions.count_x,
            count_y: assembly.conditions.count_y,
            files: assembly.files.iter().map(source_file_name).collect(),
        });

        let (title, lens_name) = doc
            .strings
            .as_ref()
            .map(|s| (s.title.clone(), s.lens_name.clone()))
            .unwrap_or_default();

        let c = &doc.conditions;

        DocumentSummary {
            dll_version: doc.header.dll_version_number(),
            acquired_at: format_timestamp(c),
            utc_offset_minutes: c.diff_utc_by_minutes,
            lens_magnification: c.lens_mag,
            x_length_per_pixel: c.x_length_per_pixel,
            y_length_per_pixel: c.y_length_per_pixel,
            z_length_per_digit: c.z_length_per_digit,
            image_count: doc.image_count(),
            images,
            assembly,
            has_line_measurement: doc.line_measurement.is_some(),
            title,
            lens_name,
        }
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DLL version:     {}", self.dll_version)?;
        writeln!(
            f,
            "Acquired:        {} (UTC{:+} min)",
            self.acquired_at, self.utc_offset_minutes
        )?;
        writeln!(f, "Lens:            {} ({}x)", self.lens_name, self.lens_magnification)?;
        if !self.title.is_empty() {
            writeln!(f, "Title:           {}", self.title)?;
        }
        writeln!(
            f,
            "Pixel pitch:     {} x {} pm, {} pm/digit",
            self.x_length_per_pixel, self.y_length_per_pixel, self.z_length_per_digit
        )?;
        writeln!(f, "Images:          {} false-color", self.image_count)?;
        for img in &self.images {
            writeln!(
                f,
                "  {:<14} {}x{} @ {} bit, {} bytes",
                img.section, img.width, img.height, img.bit_depth, img.byte_size
            )?;
        }
        if let Some(assembly) = &self.assembly {
            writeln!(
                f,
                "Assembly:        {} x {} tiles, {} files",
                assembly.count_x,
                assembly.count_y,
                assembly.files.len()
            )?;
            for name in &assembly.files {
                writeln!(f, "  {}", name)?;
            }
        }
        write!(
            f,
            "Line profile:    {}",
            if self.has_line_measurement { "yes" } else { "no" }
        )
    }
}

fn format_timestamp(c: &MeasurementConditions) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        c.year, c.month, c.day, c.hour, c.minute, c.second
    )
}

/// Decode a NUL-padded UTF-16 file name.
fn source_file_name(file: &AssemblyFile) -> String {
    let end = file
        .source_file
        .iter()
        .position(|&unit| unit == 0)
        .unwrap_or(file.source_file.len());
    String::from_utf16_lossy(&file.source_file[..end])
}
