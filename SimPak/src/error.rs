//! Error types for `SimPak` builds

use std::path::PathBuf;

use thiserror::Error;

/// The error type for build and extract operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BuildError {
    // ==================== Fatal, pre-flight ====================
    /// The configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A path matched two mutually exclusive glob categories.
    #[error(
        "file path '{}' appears in both tuning and SimData glob lists; \
         the source patterns are probably incorrect",
        path.display()
    )]
    ClassificationConflict {
        /// The offending path.
        path: PathBuf,
    },

    // ==================== Per-file, tuning phase ====================
    /// Two tuning files declare the same name.
    #[error("tuning name '{name}' is already used by another file")]
    DuplicateName {
        /// The repeated `n` attribute.
        name: String,
    },

    /// Two tuning files declare the same instance id.
    #[error("tuning instance {instance} is already used by another file")]
    DuplicateInstance {
        /// The repeated `s` attribute.
        instance: u64,
    },

    /// The tuning type attribute is unknown or the generic placeholder.
    #[error("invalid tuning type attribute: {attr:?}")]
    InvalidType {
        /// The `i` attribute, if present.
        attr: Option<String>,
    },

    // ==================== Per-file, SimData phase ====================
    /// A SimData references a tuning that was not resolved in this build.
    #[error(
        "no tuning named '{name}' has been built; the tuning file is missing or failed to build"
    )]
    MissingTuning {
        /// The referenced tuning name.
        name: String,
    },

    /// The referenced tuning's type has no SimData group.
    #[error("tuning type {resource_type:08X} has no SimData group")]
    UnmappedGroup {
        /// The referenced tuning's resource type.
        resource_type: u32,
    },

    // ==================== Per-file, any phase ====================
    /// A source file or pre-built package could not be parsed.
    #[error(transparent)]
    Parse(#[from] simmodels::Error),

    // ==================== Cache (never fatal) ====================
    /// The cache file could not be read.
    #[error("failed to read cache: {0}")]
    CacheLoad(String),

    /// The cache file could not be written.
    #[error("failed to save cache: {0}")]
    CacheSave(String),

    /// A per-file error, attributed to the file that caused it.
    #[error("{}: {source}", path.display())]
    InFile {
        /// The offending file.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: Box<BuildError>,
    },

    // ==================== IO ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Attribute this error to `path`
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        BuildError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, looking through file attribution
    #[must_use]
    pub fn root(&self) -> &BuildError {
        match self {
            BuildError::InFile { source, .. } => source.root(),
            other => other,
        }
    }

    /// Errors that abort a build before any output is written
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.root(),
            BuildError::Config(_) | BuildError::ClassificationConflict { .. }
        )
    }

    /// Errors raised while processing a single source file
    #[must_use]
    pub fn is_per_file(&self) -> bool {
        matches!(
            self.root(),
            BuildError::DuplicateName { .. }
                | BuildError::DuplicateInstance { .. }
                | BuildError::InvalidType { .. }
                | BuildError::MissingTuning { .. }
                | BuildError::UnmappedGroup { .. }
                | BuildError::Parse(_)
                | BuildError::Io(_)
        )
    }

    /// Cache errors are logged and never abort a build
    #[must_use]
    pub fn is_cache(&self) -> bool {
        matches!(self.root(), BuildError::CacheLoad(_) | BuildError::CacheSave(_))
    }
}

/// A specialized Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
