//! DBPF package writing

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::Compression;
use flate2::write::ZlibEncoder;

use super::types::{CompressionType, PackageEntry, ResourceData};
use super::{
    EXTENDED_COMPRESSION_FLAG, HEADER_SIZE, INDEX_MINOR_VERSION, MAGIC, MAJOR_VERSION,
    MINOR_VERSION,
};
use crate::error::{Error, Result};

/// Details about a written entry
struct WrittenEntry {
    offset: u32,
    size: u32,
    decompressed_size: u32,
    compression: CompressionType,
}

fn zlib_compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn to_u32(value: usize, entry: &PackageEntry) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::ResourceTooLarge {
        key: entry.key.to_string(),
        size: value,
    })
}

/// Serialize entries into a DBPF 2.1 package buffer
///
/// Decoded entries are zlib-compressed; raw entries are copied verbatim. The
/// header carries no timestamps, so identical entries give identical bytes.
///
/// # Errors
/// Returns an error if compression fails or the package exceeds the 32-bit
/// offsets of the format.
pub fn write_package(entries: &[PackageEntry]) -> Result<Vec<u8>> {
    let index_count = u32::try_from(entries.len()).map_err(|_| Error::PackageTooManyEntries {
        count: entries.len(),
    })?;

    let mut out = vec![0u8; HEADER_SIZE];
    let mut written = Vec::with_capacity(entries.len());

    // Entry data
    for entry in entries {
        let offset = to_u32(out.len(), entry)?;
        let (stored, decompressed_size, compression) = match &entry.data {
            ResourceData::Decoded(bytes) => {
                let compressed = zlib_compress(bytes)?;
                (compressed, to_u32(bytes.len(), entry)?, CompressionType::Zlib)
            }
            ResourceData::Raw(raw) => (raw.data.clone(), raw.decompressed_size, raw.compression),
        };

        let size = to_u32(stored.len(), entry)?;
        if size & EXTENDED_COMPRESSION_FLAG != 0 {
            return Err(Error::ResourceTooLarge {
                key: entry.key.to_string(),
                size: stored.len(),
            });
        }
        out.extend_from_slice(&stored);

        written.push(WrittenEntry {
            offset,
            size,
            decompressed_size,
            compression,
        });
    }

    // Index (no constant fields)
    let index_offset = out.len() as u64;
    let mut index = Vec::with_capacity(4 + 32 * written.len());
    index.write_u32::<LittleEndian>(0)?;
    for (entry, record) in entries.iter().zip(&written) {
        index.write_u32::<LittleEndian>(entry.key.resource_type)?;
        index.write_u32::<LittleEndian>(entry.key.group)?;
        index.write_u32::<LittleEndian>(entry.key.instance_high())?;
        index.write_u32::<LittleEndian>(entry.key.instance_low())?;
        index.write_u32::<LittleEndian>(record.offset)?;
        index.write_u32::<LittleEndian>(record.size | EXTENDED_COMPRESSION_FLAG)?;
        index.write_u32::<LittleEndian>(record.decompressed_size)?;
        index.write_u16::<LittleEndian>(record.compression.to_u16())?;
        index.write_u16::<LittleEndian>(1)?; // committed
    }
    let index_size = u32::try_from(index.len()).map_err(|_| Error::PackageTooManyEntries {
        count: entries.len(),
    })?;
    out.extend_from_slice(&index);

    // Header
    let mut header = Vec::with_capacity(HEADER_SIZE);
    header.write_all(&MAGIC)?;
    header.write_u32::<LittleEndian>(MAJOR_VERSION)?;
    header.write_u32::<LittleEndian>(MINOR_VERSION)?;
    header.write_all(&[0u8; 24])?; // user version, flags, dates, index major version
    header.write_u32::<LittleEndian>(index_count)?;
    // Older readers only look at the 32-bit position
    header.write_u32::<LittleEndian>(u32::try_from(index_offset).unwrap_or(0))?;
    header.write_u32::<LittleEndian>(index_size)?;
    header.write_all(&[0u8; 12])?;
    header.write_u32::<LittleEndian>(INDEX_MINOR_VERSION)?;
    header.write_u64::<LittleEndian>(index_offset)?;
    header.resize(HEADER_SIZE, 0);
    out[..HEADER_SIZE].copy_from_slice(&header);

    Ok(out)
}
