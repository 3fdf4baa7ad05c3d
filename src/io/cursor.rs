//! Bounds-checked read position over an immutable byte buffer.
//!
//! Every offset in a VK4 file comes from untrusted file content, so every
//! read goes through [`Cursor`], which validates the remaining length before
//! touching the buffer and fails with [`Vk4Error::Truncated`] instead of
//! panicking or reading past the end.

use bytes::Bytes;

use super::range_reader::{read_i32_le, read_u16_le, read_u32_le};
use crate::error::Vk4Error;

/// Read position over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current absolute position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the current position and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Move to an absolute position.
    ///
    /// Seeking to exactly the end of the buffer is allowed; anything past
    /// it is an error.
    pub fn seek(&mut self, offset: u64) -> Result<(), Vk4Error> {
        if offset > self.data.len() as u64 {
            return Err(Vk4Error::Truncated {
                offset,
                requested: 0,
                available: 0,
            });
        }
        self.pos = offset as usize;
        Ok(())
    }

    /// Require strictly more than `n` bytes after the current position.
    ///
    /// This is the check the leading fixed-size blocks (header, offset
    /// table, measurement conditions) are guarded by: a block that ends
    /// exactly at the end of the buffer is rejected.
    pub fn ensure_more_than(&self, n: u64) -> Result<(), Vk4Error> {
        if self.pos as u64 + n >= self.data.len() as u64 {
            return Err(self.truncated(n));
        }
        Ok(())
    }

    fn truncated(&self, requested: u64) -> Vk4Error {
        Vk4Error::Truncated {
            offset: self.pos as u64,
            requested,
            available: self.remaining() as u64,
        }
    }

    /// Borrow the next `n` bytes and advance past them.
    fn take(&mut self, n: usize) -> Result<&'a [u8], Vk4Error> {
        if n > self.remaining() {
            return Err(self.truncated(n as u64));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, Vk4Error> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, Vk4Error> {
        Ok(read_u16_le(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, Vk4Error> {
        Ok(read_u32_le(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, Vk4Error> {
        Ok(read_i32_le(self.take(4)?))
    }

    /// Read a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Vk4Error> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read `N` consecutive little-endian u32 values.
    pub fn read_u32_array<const N: usize>(&mut self) -> Result<[u32; N], Vk4Error> {
        let bytes = self.take(N * 4)?;
        let mut out = [0u32; N];
        for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = read_u32_le(chunk);
        }
        Ok(out)
    }

    /// Read `N` consecutive little-endian u16 values.
    pub fn read_u16_array<const N: usize>(&mut self) -> Result<[u16; N], Vk4Error> {
        let bytes = self.take(N * 2)?;
        let mut out = [0u16; N];
        for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(2)) {
            *value = read_u16_le(chunk);
        }
        Ok(out)
    }

    /// Copy the next `n` bytes out of the buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes, Vk4Error> {
        Ok(Bytes::copy_from_slice(self.take(n)?))
    }

    /// Read `count` UTF-16LE code units and decode them, replacing invalid
    /// sequences with U+FFFD.
    pub fn read_utf16_string(&mut self, count: usize) -> Result<String, Vk4Error> {
        let byte_len = count.checked_mul(2).ok_or_else(|| self.truncated(u64::MAX))?;
        let bytes = self.take(byte_len)?;
        let units: Vec<u16> = bytes.chunks_exact(2).map(read_u16_le).collect();
        Ok(String::from_utf16_lossy(&units))
    }
}
