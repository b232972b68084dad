//! Types for DBPF package handling

use std::borrow::Cow;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{Error, Result};
use crate::key::ResourceKey;

/// Compression applied to an entry's stored bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    Uncompressed,
    /// Standard zlib stream
    Zlib,
    /// RefPack ("internal") compression
    Internal,
    Streamable,
    /// Entry marked as deleted
    Deleted,
    Unknown(u16),
}

impl CompressionType {
    #[must_use]
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0000 => CompressionType::Uncompressed,
            0x5A42 => CompressionType::Zlib,
            0xFFFF => CompressionType::Internal,
            0xFFFE => CompressionType::Streamable,
            0xFFE0 => CompressionType::Deleted,
            other => CompressionType::Unknown(other),
        }
    }

    #[must_use]
    pub fn to_u16(self) -> u16 {
        match self {
            CompressionType::Uncompressed => 0x0000,
            CompressionType::Zlib => 0x5A42,
            CompressionType::Internal => 0xFFFF,
            CompressionType::Streamable => 0xFFFE,
            CompressionType::Deleted => 0xFFE0,
            CompressionType::Unknown(other) => other,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionType::Uncompressed => "none",
            CompressionType::Zlib => "zlib",
            CompressionType::Internal => "internal",
            CompressionType::Streamable => "streamable",
            CompressionType::Deleted => "deleted",
            CompressionType::Unknown(_) => "unknown",
        }
    }
}

/// An entry's bytes exactly as stored in a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResource {
    /// Stored (possibly compressed) bytes
    pub data: Vec<u8>,
    pub compression: CompressionType,
    /// Size after decompression
    pub decompressed_size: u32,
}

impl RawResource {
    /// Decompress the stored bytes
    ///
    /// # Errors
    /// Returns an error for compression types that cannot be decoded
    /// (RefPack, streamable) or corrupt zlib data.
    pub fn decompress(&self, key: &ResourceKey) -> Result<Vec<u8>> {
        match self.compression {
            CompressionType::Uncompressed => Ok(self.data.clone()),
            CompressionType::Zlib => {
                let mut decoder = ZlibDecoder::new(self.data.as_slice());
                let mut out = Vec::with_capacity(self.decompressed_size as usize);
                decoder.read_to_end(&mut out).map_err(|e| {
                    Error::DecompressionError(format!("zlib stream for {key}: {e}"))
                })?;
                Ok(out)
            }
            other => Err(Error::UnsupportedCompression {
                key: key.to_string(),
                compression: other.to_u16(),
            }),
        }
    }
}

/// Contents of a package entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceData {
    /// Uncompressed resource bytes; compressed when the package is written
    Decoded(Vec<u8>),
    /// Stored bytes carried through untouched
    Raw(RawResource),
}

/// A keyed resource in a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub key: ResourceKey,
    pub data: ResourceData,
}

impl PackageEntry {
    #[must_use]
    pub fn new(key: ResourceKey, bytes: Vec<u8>) -> Self {
        Self {
            key,
            data: ResourceData::Decoded(bytes),
        }
    }

    /// The entry's uncompressed bytes, decoding raw entries on demand
    ///
    /// # Errors
    /// Returns an error if a raw entry cannot be decompressed.
    pub fn bytes(&self) -> Result<Cow<'_, [u8]>> {
        match &self.data {
            ResourceData::Decoded(bytes) => Ok(Cow::Borrowed(bytes)),
            ResourceData::Raw(raw) => raw.decompress(&self.key).map(Cow::Owned),
        }
    }
}

/// Index record describing one entry of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: ResourceKey,
    /// Absolute offset of the stored bytes
    pub offset: u64,
    /// Stored size
    pub size: u32,
    pub decompressed_size: u32,
    pub compression: CompressionType,
}

/// Options for reading package entries
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Keep every entry's stored bytes untouched instead of decompressing
    pub load_raw: bool,
}
