use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::range_reader::{check_range, RangeReader};
use crate::error::IoError;

/// Local filesystem implementation of RangeReader.
///
/// The file size is fetched once on creation. Each read opens the file,
/// seeks to the requested offset and reads exactly the requested length.
#[derive(Debug, Clone)]
pub struct LocalFileReader {
    path: PathBuf,
    size: u64,
    identifier: String,
}

impl LocalFileReader {
    /// Create a reader for the file at `path`.
    ///
    /// Returns `IoError::NotFound` if the file does not exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref().to_path_buf();
        let identifier = path.display().to_string();

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| map_io_error(e, &identifier))?;

        if !metadata.is_file() {
            return Err(IoError::Io(format!("{} is not a regular file", identifier)));
        }

        Ok(Self {
            path,
            size: metadata.len(),
            identifier,
        })
    }

    /// Get the path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RangeReader for LocalFileReader {
    async fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        check_range(offset, len, self.size)?;
        if len == 0 {
            return Ok(Bytes::new());
        }

        let mut file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| map_io_error(e, &self.identifier))?;
        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(|e| IoError::Io(e.to_string()))?;

        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf)
            .await
            .map_err(|e| IoError::Io(e.to_string()))?;

        Ok(Bytes::from(buf))
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

fn map_io_error(err: std::io::Error, identifier: &str) -> IoError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IoError::NotFound(identifier.to_string())
    } else {
        IoError::Io(format!("{}: {}", identifier, err))
    }
}

/// In-memory implementation of RangeReader.
///
/// Useful when the caller already holds the file contents.
#[derive(Debug, Clone)]
pub struct MemoryReader {
    data: Bytes,
    identifier: String,
}

impl MemoryReader {
    pub fn new(data: impl Into<Bytes>, identifier: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            identifier: identifier.into(),
        }
    }
}

#[async_trait]
impl RangeReader for MemoryReader {
    async fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        check_range(offset, len, self.data.len() as u64)?;
        let start = offset as usize;
        Ok(self.data.slice(start..start + len))
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}
