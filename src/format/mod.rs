//! Format parsers for Keyence VK4 files.
//!
//! # Format Detection
//!
//! Use [`detect::is_vk4_header`] or [`detect::detect_file_type`] to check the
//! leading bytes of a file before decoding it with [`vk4::decode`].

pub mod detect;
pub mod vk4;

pub use detect::{detect_file_type, is_vk4_header};
