//! Error types for `SimModels`

use thiserror::Error;

/// The error type for `SimModels` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Package (DBPF) Errors ====================
    /// The buffer is not a DBPF package (missing DBPF magic).
    #[error("invalid package magic: expected DBPF, found {0:?}")]
    InvalidPackageMagic([u8; 4]),

    /// The package version is not 2.1.
    #[error("unsupported package version: {major}.{minor} (supported: 2.1)")]
    UnsupportedPackageVersion {
        /// Major version found in the header.
        major: u32,
        /// Minor version found in the header.
        minor: u32,
    },

    /// An index entry points outside of the package buffer.
    #[error("entry {key} lies outside the package (offset {offset}, size {size})")]
    EntryOutOfBounds {
        /// Formatted resource key of the entry.
        key: String,
        /// Offset of the entry data.
        offset: u64,
        /// Stored size of the entry data.
        size: u32,
    },

    /// The index does not fit in the package buffer.
    #[error("index of {count} entries at offset {offset} lies outside the package")]
    IndexOutOfBounds {
        /// Offset of the index.
        offset: u64,
        /// Entry count claimed by the header.
        count: u32,
    },

    /// The entry uses a compression type this library cannot decode.
    #[error("unsupported compression type 0x{compression:04X} for {key}")]
    UnsupportedCompression {
        /// Formatted resource key of the entry.
        key: String,
        /// The raw compression type.
        compression: u16,
    },

    /// The package contains too many entries to index.
    #[error("package contains too many entries: {count}")]
    PackageTooManyEntries {
        /// Number of entries.
        count: usize,
    },

    /// An entry is too large to be stored in a package.
    #[error("resource {key} is too large: {size} bytes")]
    ResourceTooLarge {
        /// Formatted resource key of the entry.
        key: String,
        /// Size in bytes.
        size: usize,
    },

    // ==================== Resource Key Errors ====================
    /// A resource key string could not be parsed.
    #[error("invalid resource key: {0}")]
    InvalidResourceKey(String),

    // ==================== XML Errors ====================
    /// Malformed XML.
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// Malformed XML attribute.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// XML is well-formed but is not a tuning document.
    #[error("invalid tuning: {message}")]
    InvalidTuning {
        /// Description of what is invalid.
        message: String,
    },

    /// XML is well-formed but is not a SimData document.
    #[error("invalid SimData: {message}")]
    InvalidSimData {
        /// Description of what is invalid.
        message: String,
    },

    /// Decompression of an entry failed.
    #[error("decompression error: {0}")]
    DecompressionError(String),
}

// Add conversion from quick_xml::events::attributes::AttrError
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

/// A specialized Result type for `SimModels` operations.
pub type Result<T> = std::result::Result<T, Error>;
