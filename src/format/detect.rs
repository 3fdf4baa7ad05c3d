//! Format detection for VK4 files.
//!
//! Cheap checks on the leading bytes of a file, usable before committing to
//! a full decode. A file is recognised as VK4 by its `VK4_` magic; the type
//! tag that follows the DLL version tells whether it is a variant this crate
//! can decode.

use super::vk4::{FileType, HEADER_SIZE, VK4_MAGIC};

/// Check if bytes start with the VK4 magic.
pub fn is_vk4_header(bytes: &[u8]) -> bool {
    bytes.starts_with(&VK4_MAGIC)
}

/// Identify the file type declared by a VK4 header.
///
/// Returns `None` if `bytes` is shorter than the 12-byte header or does not
/// carry the VK4 magic.
pub fn detect_file_type(bytes: &[u8]) -> Option<FileType> {
    if bytes.len() < HEADER_SIZE || !is_vk4_header(bytes) {
        return None;
    }

    let mut tag = [0u8; 4];
    tag.copy_from_slice(&bytes[8..HEADER_SIZE]);
    Some(FileType::from_tag(tag))
}

// =============================================================================
// Tests
// =============================================================================
