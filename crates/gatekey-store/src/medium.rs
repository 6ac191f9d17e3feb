//! Persistent byte medium abstraction.
//!
//! The code store addresses its backing storage as a flat byte array with
//! read/write-at-offset semantics, the contract an EEPROM or flash page
//! gives an embedded port. Keeping that contract behind a trait lets tests
//! run against [`MemoryMedium`] and development hosts persist to a plain
//! file via [`FileMedium`], without the store caring which is underneath.
//!
//! Writes are synchronous: when `write` returns `Ok`, the bytes are
//! handed to the medium for good. There is no buffering and no retry.

use crate::error::{StoreError, StoreResult};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Flat byte storage with read/write-at-offset semantics.
pub trait StorageMedium: Send {
    /// Read `buf.len()` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range falls outside the medium or the read
    /// fails.
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> StoreResult<()>;

    /// Write `data` starting at `offset`, completing before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the range falls outside the medium or the
    /// write fails.
    fn write(&mut self, offset: u64, data: &[u8]) -> StoreResult<()>;

    /// Total size of the medium in bytes.
    fn len(&self) -> u64;

    /// Returns `true` if the medium has zero capacity.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_bounds(offset: u64, len: usize, size: u64) -> StoreResult<()> {
    let end = offset.checked_add(len as u64);
    match end {
        Some(end) if end <= size => Ok(()),
        _ => Err(StoreError::OutOfBounds { offset, len, size }),
    }
}

/// Volatile in-memory medium for tests and ephemeral stores.
///
/// Starts zero-filled, like factory-fresh EEPROM after an erase-to-zero.
#[derive(Debug, Clone)]
pub struct MemoryMedium {
    bytes: Vec<u8>,
}

impl MemoryMedium {
    /// Create a zero-filled medium of `size` bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Create a medium pre-loaded with `bytes` (e.g., an EEPROM image).
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Raw view of the medium's contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl StorageMedium for MemoryMedium {
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> StoreResult<()> {
        check_bounds(offset, buf.len(), self.len())?;
        let start = offset as usize;
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: u64, data: &[u8]) -> StoreResult<()> {
        check_bounds(offset, data.len(), self.len())?;
        let start = offset as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// File-backed medium for development hosts.
///
/// Each write seeks, writes and syncs before returning, preserving the
/// write-through contract of the embedded media this stands in for.
#[derive(Debug)]
pub struct FileMedium {
    file: File,
    size: u64,
}

impl FileMedium {
    /// Open (or create) a file medium of at least `size` bytes.
    ///
    /// A shorter existing file is extended with zeros; a longer one keeps
    /// its full length.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or resized.
    pub fn open(path: impl AsRef<Path>, size: u64) -> StoreResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.as_ref())?;

        let current = file.metadata()?.len();
        let size = if current < size {
            file.set_len(size)?;
            size
        } else {
            current
        };

        debug!("file medium opened: {} ({size} bytes)", path.as_ref().display());
        Ok(Self { file, size })
    }
}

impl StorageMedium for FileMedium {
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> StoreResult<()> {
        check_bounds(offset, buf.len(), self.size)?;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    fn write(&mut self, offset: u64, data: &[u8]) -> StoreResult<()> {
        check_bounds(offset, data.len(), self.size)?;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(data)?;
        self.file.sync_data()?;
        Ok(())
    }

    fn len(&self) -> u64 {
        self.size
    }
}
