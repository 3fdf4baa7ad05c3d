//! Assembly (stitching) section.
//!
//! # Layout
//!
//! ```text
//! AssemblyInfo        16 bytes: size u32, file type u16, stage type u16, x u32, y u32
//! AssemblyConditions   8 bytes: auto adjust u8, source u8, thin out u16, count x u16, count y u16
//! AssemblyFile[n]    532 bytes each, n = count_x * count_y
//! ```
//!
//! Files in the wild declare tile counts without carrying the file records.
//! When the bytes after the headers cannot hold `count_x * count_y` records,
//! the counts are reset to zero and no records are read; this is tolerated,
//! not an error.

use tracing::{debug, warn};

use crate::error::{Section, Vk4Error};
use crate::io::Cursor;

use super::{locate_section, ASSEMBLY_FILE_NAME_LEN, ASSEMBLY_FILE_SIZE, ASSEMBLY_HEADERS_SIZE};

// =============================================================================
// AssemblyFileType
// =============================================================================

/// How the stitched source files are referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyFileType {
    Normal = 0,
    AssemblyFile = 1,
    AssemblyFileUnicode = 2,
}

impl TryFrom<u16> for AssemblyFileType {
    type Error = Vk4Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AssemblyFileType::Normal),
            1 => Ok(AssemblyFileType::AssemblyFile),
            2 => Ok(AssemblyFileType::AssemblyFileUnicode),
            other => Err(Vk4Error::InvalidAssemblyFileType(other)),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyInfo {
    /// Size of all assembly-related blocks together
    pub size: u32,
    pub file_type: AssemblyFileType,
    pub stage_type: u16,
    pub x_position: u32,
    pub y_position: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyConditions {
    pub auto_adjustment: u8,
    pub source: u8,
    pub thin_out: u16,
    pub count_x: u16,
    pub count_y: u16,
}

/// One stitched source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyFile {
    /// Fixed-length UTF-16 code units, NUL padded. Left undecoded.
    pub source_file: [u16; ASSEMBLY_FILE_NAME_LEN],
    pub pos_x: u8,
    pub pos_y: u8,
    pub datums_pos: u8,
    pub fix_distance: u8,
    pub distance_x: u32,
    pub distance_y: u32,
}

/// Decoded assembly section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub info: AssemblyInfo,
    pub conditions: AssemblyConditions,
    /// Empty when the declared counts are zero or could not be honoured
    pub files: Vec<AssemblyFile>,
}

impl Assembly {
    /// Parse the assembly section at `offset`.
    ///
    /// # Errors
    /// - `SectionOutOfBounds` if the 24 header bytes do not fit at `offset`
    /// - `InvalidAssemblyFileType` for an unknown file type value
    pub fn parse(cursor: &mut Cursor<'_>, offset: u32) -> Result<Self, Vk4Error> {
        locate_section(cursor, Section::Assembly, offset, ASSEMBLY_HEADERS_SIZE)?;

        let info = AssemblyInfo {
            size: cursor.read_u32()?,
            file_type: AssemblyFileType::try_from(cursor.read_u16()?)?,
            stage_type: cursor.read_u16()?,
            x_position: cursor.read_u32()?,
            y_position: cursor.read_u32()?,
        };

        let mut conditions = AssemblyConditions {
            auto_adjustment: cursor.read_u8()?,
            source: cursor.read_u8()?,
            thin_out: cursor.read_u16()?,
            count_x: cursor.read_u16()?,
            count_y: cursor.read_u16()?,
        };

        let nfiles = usize::from(conditions.count_x) * usize::from(conditions.count_y);
        if nfiles == 0 {
            return Ok(Assembly {
                info,
                conditions,
                files: Vec::new(),
            });
        }

        if cursor.remaining() / nfiles < ASSEMBLY_FILE_SIZE {
            warn!(
                count_x = conditions.count_x,
                count_y = conditions.count_y,
                remaining = cursor.remaining(),
                "assembly declares more files than the buffer holds, ignoring them"
            );
            conditions.count_x = 0;
            conditions.count_y = 0;
            return Ok(Assembly {
                info,
                conditions,
                files: Vec::new(),
            });
        }

        let files = (0..nfiles)
            .map(|_| read_assembly_file(cursor))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(offset, nfiles, "parsed assembly section");

        Ok(Assembly {
            info,
            conditions,
            files,
        })
    }
}

fn read_assembly_file(cursor: &mut Cursor<'_>) -> Result<AssemblyFile, Vk4Error> {
    Ok(AssemblyFile {
        source_file: cursor.read_u16_array::<ASSEMBLY_FILE_NAME_LEN>()?,
        pos_x: cursor.read_u8()?,
        pos_y: cursor.read_u8()?,
        datums_pos: cursor.read_u8()?,
        fix_distance: cursor.read_u8()?,
        distance_x: cursor.read_u32()?,
        distance_y: cursor.read_u32()?,
    })
}
