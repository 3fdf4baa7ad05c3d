//! # VK4 Reader
//!
//! A decoder for Keyence VK4 files, the container written by VK-series
//! confocal laser-scanning microscopes.
//!
//! A VK4 file holds measurement metadata, up to three light-intensity and
//! three height rasters, optional true-color images, an optional line
//! profile, assembly (stitching) metadata and two descriptive strings. This
//! crate validates every section against the buffer before reading it and
//! returns fully typed records.
//!
//! ## Architecture
//!
//! - [`io`] - Byte sources (local file, memory) and the bounds-checked cursor
//! - [`mod@format`] - Format detection and the section parsers
//! - [`reader`] - Async loading of a whole file followed by a decode
//! - [`summary`] - Serializable overview of a decoded file
//! - [`config`] - CLI configuration for `vk4-inspect`
//!
//! ## Example
//!
//! ```rust,no_run
//! use vk4_reader::{LocalFileReader, Vk4Reader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = LocalFileReader::open("scan.vk4").await?;
//!     let reader = Vk4Reader::open(&source).await?;
//!
//!     for (section, image) in reader.document().false_color_images() {
//!         println!("{}: {}x{}", section, image.width, image.height);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod reader;
pub mod summary;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{ErrorKind, IoError, OpenError, Section, Vk4Error};
pub use format::vk4::{
    decode, Assembly, AssemblyConditions, AssemblyFile, AssemblyFileType, AssemblyInfo,
    CharacterStrings, FalseColorImage, FileType, LineMeasurement, MeasurementConditions,
    OffsetTable, Palette, TrueColorImage, Vk4Document, Vk4Header,
};
pub use format::{detect_file_type, is_vk4_header};
pub use io::{LocalFileReader, MemoryReader, RangeReader};
pub use reader::{Vk4Reader, DEFAULT_MAX_FILE_SIZE};
pub use summary::{AssemblySummary, DocumentSummary, ImageSummary};
