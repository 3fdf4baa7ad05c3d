//! Configuration for the `vk4-inspect` command line tool.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks:
//!
//! - `VK4_FORMAT` - Output format, `summary` or `json` (default: summary)
//! - `VK4_MAX_FILE_SIZE` - Largest file to load, in bytes (default: 1 GiB)
//!
//! Log filtering follows `RUST_LOG` when set.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::reader::DEFAULT_MAX_FILE_SIZE;

// =============================================================================
// Output Format
// =============================================================================

/// How a decoded file is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Summary,

    /// Pretty-printed JSON
    Json,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// VK4 Inspect - Decode Keyence VK4 laser-microscope files.
///
/// Reads a .vk4 file, validates every section and prints a summary of its
/// measurement conditions and images.
#[derive(Parser, Debug, Clone)]
#[command(name = "vk4-inspect")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the .vk4 file.
    pub path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary, env = "VK4_FORMAT")]
    pub format: OutputFormat,

    /// Refuse files larger than this many bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "VK4_MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("A path to a .vk4 file is required".to_string());
        }

        if self.max_file_size == 0 {
            return Err(
                "max_file_size must be greater than 0. Set --max-file-size or VK4_MAX_FILE_SIZE"
                    .to_string(),
            );
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
