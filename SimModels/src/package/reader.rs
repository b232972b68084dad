//! DBPF package reading

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use super::types::{
    CompressionType, IndexEntry, PackageEntry, RawResource, ReadOptions, ResourceData,
};
use super::{
    EXTENDED_COMPRESSION_FLAG, HEADER_SIZE, INDEX_CONSTANT_GROUP, INDEX_CONSTANT_INSTANCE_HIGH,
    INDEX_CONSTANT_TYPE, MAGIC, MAJOR_VERSION, MINOR_VERSION,
};
use crate::error::{Error, Result};
use crate::key::ResourceKey;

/// Smallest index record: instance low, offset, size and memory size
const MIN_INDEX_RECORD_SIZE: u64 = 16;

/// Fields of the package header needed to locate the index
struct Header {
    index_count: u32,
    index_offset: u64,
}

fn read_header(cursor: &mut Cursor<&[u8]>) -> Result<Header> {
    if cursor.get_ref().len() < HEADER_SIZE {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "buffer is smaller than a package header",
        )));
    }

    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(Error::InvalidPackageMagic(magic));
    }

    let major = cursor.read_u32::<LittleEndian>()?;
    let minor = cursor.read_u32::<LittleEndian>()?;
    if major != MAJOR_VERSION || minor != MINOR_VERSION {
        return Err(Error::UnsupportedPackageVersion { major, minor });
    }

    cursor.seek(SeekFrom::Start(36))?;
    let index_count = cursor.read_u32::<LittleEndian>()?;
    let index_offset_short = cursor.read_u32::<LittleEndian>()?;

    cursor.seek(SeekFrom::Start(64))?;
    let index_offset_long = cursor.read_u64::<LittleEndian>()?;

    // Older writers only fill in the 32-bit position
    let index_offset = if index_offset_long == 0 {
        u64::from(index_offset_short)
    } else {
        index_offset_long
    };

    Ok(Header {
        index_count,
        index_offset,
    })
}

/// Read the index records of a package buffer
///
/// # Errors
/// Returns an error if the header is invalid or the index is truncated.
pub fn read_index(bytes: &[u8]) -> Result<Vec<IndexEntry>> {
    let mut cursor = Cursor::new(bytes);
    let header = read_header(&mut cursor)?;

    if header.index_count == 0 {
        return Ok(Vec::new());
    }

    let out_of_bounds = || Error::IndexOutOfBounds {
        offset: header.index_offset,
        count: header.index_count,
    };
    if header.index_offset >= bytes.len() as u64 {
        return Err(out_of_bounds());
    }

    cursor.seek(SeekFrom::Start(header.index_offset))?;
    let flags = cursor.read_u32::<LittleEndian>()?;

    let constant_type = if flags & INDEX_CONSTANT_TYPE != 0 {
        Some(cursor.read_u32::<LittleEndian>()?)
    } else {
        None
    };
    let constant_group = if flags & INDEX_CONSTANT_GROUP != 0 {
        Some(cursor.read_u32::<LittleEndian>()?)
    } else {
        None
    };
    let constant_instance_high = if flags & INDEX_CONSTANT_INSTANCE_HIGH != 0 {
        Some(cursor.read_u32::<LittleEndian>()?)
    } else {
        None
    };

    // The count comes from the file; bound it before allocating
    let remaining = (bytes.len() as u64).saturating_sub(cursor.position());
    if u64::from(header.index_count) > remaining / MIN_INDEX_RECORD_SIZE {
        return Err(out_of_bounds());
    }

    let mut entries = Vec::with_capacity(header.index_count as usize);
    for _ in 0..header.index_count {
        let resource_type = match constant_type {
            Some(t) => t,
            None => cursor.read_u32::<LittleEndian>()?,
        };
        let group = match constant_group {
            Some(g) => g,
            None => cursor.read_u32::<LittleEndian>()?,
        };
        let instance_high = match constant_instance_high {
            Some(i) => i,
            None => cursor.read_u32::<LittleEndian>()?,
        };
        let instance_low = cursor.read_u32::<LittleEndian>()?;
        let offset = cursor.read_u32::<LittleEndian>()?;
        let size_field = cursor.read_u32::<LittleEndian>()?;
        let decompressed_size = cursor.read_u32::<LittleEndian>()?;

        let compression = if size_field & EXTENDED_COMPRESSION_FLAG != 0 {
            let compression = cursor.read_u16::<LittleEndian>()?;
            let _committed = cursor.read_u16::<LittleEndian>()?;
            CompressionType::from_u16(compression)
        } else {
            CompressionType::Uncompressed
        };

        let instance = (u64::from(instance_high) << 32) | u64::from(instance_low);
        entries.push(IndexEntry {
            key: ResourceKey::new(resource_type, group, instance),
            offset: u64::from(offset),
            size: size_field & !EXTENDED_COMPRESSION_FLAG,
            decompressed_size,
            compression,
        });
    }

    Ok(entries)
}

/// Stored bytes of one index entry
fn stored_bytes<'a>(bytes: &'a [u8], entry: &IndexEntry) -> Result<&'a [u8]> {
    let out_of_bounds = || Error::EntryOutOfBounds {
        key: entry.key.to_string(),
        offset: entry.offset,
        size: entry.size,
    };

    let start = usize::try_from(entry.offset).map_err(|_| out_of_bounds())?;
    let end = start
        .checked_add(entry.size as usize)
        .ok_or_else(out_of_bounds)?;
    bytes.get(start..end).ok_or_else(out_of_bounds)
}

/// Read every live entry of a package buffer, in index order
///
/// Deleted entries are skipped. Unless `options.load_raw` is set, entries are
/// decompressed and an undecodable compression type is an error.
///
/// # Errors
/// Returns an error if the package is malformed or an entry cannot be decoded.
pub fn read_entries(bytes: &[u8], options: ReadOptions) -> Result<Vec<PackageEntry>> {
    let index = read_index(bytes)?;
    let mut entries = Vec::with_capacity(index.len());

    for record in &index {
        if record.compression == CompressionType::Deleted {
            tracing::debug!("Skipping deleted entry {}", record.key);
            continue;
        }

        let raw = RawResource {
            data: stored_bytes(bytes, record)?.to_vec(),
            compression: record.compression,
            decompressed_size: record.decompressed_size,
        };

        let data = if options.load_raw {
            ResourceData::Raw(raw)
        } else {
            ResourceData::Decoded(raw.decompress(&record.key)?)
        };

        entries.push(PackageEntry {
            key: record.key,
            data,
        });
    }

    Ok(entries)
}
