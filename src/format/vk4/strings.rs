//! Character string section: title and lens name.
//!
//! Each string is a u32 character count followed by that many UTF-16LE code
//! units. Unlike every other section, a string that does not fit in the
//! remaining bytes is not an error: it decodes as an empty string.

use tracing::{debug, warn};

use crate::error::{Section, Vk4Error};
use crate::io::Cursor;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterStrings {
    pub title: String,
    pub lens_name: String,
}

impl CharacterStrings {
    /// Parse both strings starting at `offset`.
    ///
    /// # Errors
    /// - `SectionOutOfBounds` if `offset` lies past the end of the buffer
    pub fn parse(cursor: &mut Cursor<'_>, offset: u32) -> Result<Self, Vk4Error> {
        let size = cursor.len() as u64;
        if u64::from(offset) > size {
            return Err(Vk4Error::SectionOutOfBounds {
                section: Section::StringData,
                offset: u64::from(offset),
                required: 0,
                size,
            });
        }
        cursor.seek(u64::from(offset))?;

        let title = read_string(cursor, "title")?;
        let lens_name = read_string(cursor, "lens name")?;

        debug!(offset, %title, %lens_name, "parsed character strings");

        Ok(CharacterStrings { title, lens_name })
    }
}

fn read_string(cursor: &mut Cursor<'_>, field: &'static str) -> Result<String, Vk4Error> {
    if cursor.remaining() < 4 {
        return Ok(String::new());
    }

    let len = cursor.read_u32()? as usize;
    if len == 0 {
        return Ok(String::new());
    }

    if cursor.remaining() / 2 < len {
        warn!(
            field,
            declared = len,
            remaining = cursor.remaining(),
            "string length exceeds section, using empty string"
        );
        return Ok(String::new());
    }

    cursor.read_utf16_string(len)
}
