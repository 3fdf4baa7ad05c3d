use std::fmt;

use thiserror::Error;

/// I/O errors that can occur when loading a VK4 file
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Underlying filesystem error
    #[error("I/O error: {0}")]
    Io(String),

    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// File not found
    #[error("File not found: {0}")]
    NotFound(String),

    /// File is larger than the configured limit
    #[error("File too large: {size} bytes exceeds the limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },
}

/// Section of a VK4 file, used to locate decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    OffsetTable,
    MeasurementConditions,
    Assembly,
    /// Light intensity channel (0..3)
    Light(usize),
    /// Height channel (0..3)
    Height(usize),
    ColorPeak,
    ColorLight,
    LineMeasurement,
    StringData,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header => f.write_str("header"),
            Section::OffsetTable => f.write_str("offset table"),
            Section::MeasurementConditions => f.write_str("measurement conditions"),
            Section::Assembly => f.write_str("assembly"),
            Section::Light(i) => write!(f, "light[{}]", i),
            Section::Height(i) => write!(f, "height[{}]", i),
            Section::ColorPeak => f.write_str("color peak"),
            Section::ColorLight => f.write_str("color light"),
            Section::LineMeasurement => f.write_str("line measurement"),
            Section::StringData => f.write_str("string data"),
        }
    }
}

/// Coarse classification of decode failures.
///
/// Callers that only care about the failure category (rather than the
/// offending values) should match on this instead of [`Vk4Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad magic, file type tag or enum value
    Format,
    /// A declared or required size exceeds the bytes available
    TruncatedData,
    /// Width or height outside [1, 65536]
    Dimension,
    /// Bit depth not allowed for the image kind
    BitDepth,
    /// Declared byte size disagrees with the image geometry
    SizeMismatch,
    /// No false-color image was decoded
    EmptyResult,
}

/// Errors that can occur when decoding a VK4 buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Vk4Error {
    /// First four bytes are not `VK4_`
    #[error("Invalid VK4 magic bytes: expected \"VK4_\", got {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// File type tag is not the normal (all-zero) variant
    #[error("Unsupported VK4 file type tag: {0:02X?}")]
    UnsupportedFileType([u8; 4]),

    /// Assembly information carries an unknown file type
    #[error("Invalid assembly file type: {0}")]
    InvalidAssemblyFileType(u16),

    /// Measurement conditions block declares less than the documented fields
    #[error("Measurement conditions too small: declared {size} bytes, minimum is {minimum}")]
    ConditionsTooSmall { size: u32, minimum: u32 },

    /// A read would run past the end of the buffer
    #[error("Truncated data: need {requested} bytes at offset {offset}, only {available} available")]
    Truncated {
        offset: u64,
        requested: u64,
        available: u64,
    },

    /// An offset table entry leaves no room for its section
    #[error("{section} section at offset {offset} needs {required} bytes, file is {size} bytes")]
    SectionOutOfBounds {
        section: Section,
        offset: u64,
        required: u64,
        size: u64,
    },

    /// Image width or height outside [1, 65536]
    #[error("Invalid {section} image {axis}: {value} (must be between 1 and 65536)")]
    InvalidDimension {
        section: Section,
        axis: &'static str,
        value: u32,
    },

    /// Bit depth not supported for this kind of image
    #[error("Unsupported bit depth for {section} image: {bit_depth}")]
    UnsupportedBitDepth { section: Section, bit_depth: u32 },

    /// Declared byte size is not exactly width * height * bytes per sample
    #[error("Size mismatch in {section} image: expected {expected} bytes, header declares {declared}")]
    SizeMismatch {
        section: Section,
        expected: u64,
        declared: u32,
    },

    /// File decoded but contains no false-color image
    #[error("No image data found in file")]
    NoImageData,
}

impl Vk4Error {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Vk4Error::InvalidMagic(_)
            | Vk4Error::UnsupportedFileType(_)
            | Vk4Error::InvalidAssemblyFileType(_)
            | Vk4Error::ConditionsTooSmall { .. } => ErrorKind::Format,
            Vk4Error::Truncated { .. } | Vk4Error::SectionOutOfBounds { .. } => {
                ErrorKind::TruncatedData
            }
            Vk4Error::InvalidDimension { .. } => ErrorKind::Dimension,
            Vk4Error::UnsupportedBitDepth { .. } => ErrorKind::BitDepth,
            Vk4Error::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Vk4Error::NoImageData => ErrorKind::EmptyResult,
        }
    }
}

/// Errors from opening a VK4 file through a [`crate::io::RangeReader`]
#[derive(Debug, Clone, Error)]
pub enum OpenError {
    /// Loading the bytes failed
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// The bytes are not a decodable VK4 file
    #[error("VK4 error: {0}")]
    Decode(#[from] Vk4Error),
}
