//! DBPF package reader/writer
//!
//! Packages are DBPF 2.1 containers: a 96-byte header, the stored entry
//! bytes, and an index of `(type, group, instance)` keys pointing into them.

mod reader;
mod types;
mod writer;

use std::path::Path;

pub use reader::{read_entries, read_index};
pub use types::*;
pub use writer::write_package;

use crate::error::Result;
use crate::key::ResourceKey;

/// DBPF magic bytes
pub const MAGIC: [u8; 4] = *b"DBPF";

/// Supported container version (2.1)
pub const MAJOR_VERSION: u32 = 2;
pub const MINOR_VERSION: u32 = 1;

/// Index version written at header offset 60
pub const INDEX_MINOR_VERSION: u32 = 3;

/// Size of the package header
pub const HEADER_SIZE: usize = 96;

/// Set on an index entry's size field when compression fields follow
pub const EXTENDED_COMPRESSION_FLAG: u32 = 0x8000_0000;

/// Index flag bits for fields shared by every entry
pub const INDEX_CONSTANT_TYPE: u32 = 0x1;
pub const INDEX_CONSTANT_GROUP: u32 = 0x2;
pub const INDEX_CONSTANT_INSTANCE_HIGH: u32 = 0x4;

/// An in-memory package: an ordered list of keyed resources
///
/// Keys are not required to be unique; entries are written in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Package {
    entries: Vec<PackageEntry>,
}

impl Package {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a package buffer, decompressing every entry
    ///
    /// # Errors
    /// Returns an error if the buffer is not a valid package or an entry uses
    /// a compression type that cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::extract_entries(bytes, ReadOptions::default()).map(|entries| Self { entries })
    }

    /// Read a package file from disk
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn read<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::extract_entries(&bytes, options).map(|entries| Self { entries })
    }

    /// Read the entries of a package buffer without building a `Package`
    ///
    /// # Errors
    /// Returns an error if the buffer is not a valid package.
    pub fn extract_entries(bytes: &[u8], options: ReadOptions) -> Result<Vec<PackageEntry>> {
        read_entries(bytes, options)
    }

    /// Append a resource under `key`
    pub fn add(&mut self, key: ResourceKey, bytes: Vec<u8>) {
        self.entries.push(PackageEntry::new(key, bytes));
    }

    /// Append entries as they are (raw entries stay raw)
    pub fn add_all<I: IntoIterator<Item = PackageEntry>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    #[must_use]
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<PackageEntry> {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to a DBPF buffer
    ///
    /// # Errors
    /// Returns an error if an entry cannot be compressed or is too large.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        write_package(&self.entries)
    }
}
