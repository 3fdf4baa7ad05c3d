//! Loading VK4 files from a byte source.
//!
//! The decoder works on a complete in-memory buffer, since section offsets
//! may point anywhere in the file. [`Vk4Reader`] fetches the whole source with
//! a single range read and decodes it.

use tracing::{debug, info};

use crate::error::{IoError, OpenError};
use crate::format::vk4::{decode, Vk4Document};
use crate::io::RangeReader;

/// Default upper bound on the size of a file that will be loaded (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1 << 30;

/// A decoded VK4 file together with the identifier of its source.
#[derive(Debug, Clone)]
pub struct Vk4Reader {
    identifier: String,
    document: Vk4Document,
}

impl Vk4Reader {
    /// Load and decode a VK4 file, refusing sources over [`DEFAULT_MAX_FILE_SIZE`].
    pub async fn open<R: RangeReader>(reader: &R) -> Result<Self, OpenError> {
        Self::open_with_limit(reader, DEFAULT_MAX_FILE_SIZE).await
    }

    /// Load and decode a VK4 file of at most `limit` bytes.
    ///
    /// # Errors
    /// - `OpenError::Io` if the source is larger than `limit` or cannot be read
    /// - `OpenError::Decode` if the bytes are not a decodable VK4 file
    pub async fn open_with_limit<R: RangeReader>(
        reader: &R,
        limit: u64,
    ) -> Result<Self, OpenError> {
        let size = reader.size();
        if size > limit {
            return Err(IoError::FileTooLarge { size, limit }.into());
        }
        let len = usize::try_from(size).map_err(|_| IoError::FileTooLarge { size, limit })?;

        debug!(identifier = reader.identifier(), size, "loading VK4 file");
        let data = reader.read_exact_at(0, len).await?;

        let document = decode(&data)?;

        info!(
            identifier = reader.identifier(),
            size,
            images = document.image_count(),
            "opened VK4 file"
        );

        Ok(Vk4Reader {
            identifier: reader.identifier().to_string(),
            document,
        })
    }

    /// Identifier of the source the file was loaded from.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn document(&self) -> &Vk4Document {
        &self.document
    }

    pub fn into_document(self) -> Vk4Document {
        self.document
    }
}
