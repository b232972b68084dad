//! Project configuration
//!
//! A project is described by a JSON file at its root:
//!
//! ```json
//! {
//!   "buildName": "MyMod",
//!   "sourceFolder": "src",
//!   "sourcePatterns": {
//!     "tuning": ["**/*.xml"],
//!     "simdata": ["**/*.SimData.xml"],
//!     "packages": ["**/*.package"]
//!   },
//!   "buildFolders": ["build"],
//!   "cacheFolder": "cache",
//!   "useCache": true,
//!   "failFast": true
//! }
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "simpak-config.json";

/// Name of the cache file inside the cache folder
pub const CACHE_FILE_NAME: &str = "cache.json";

fn default_source_folder() -> String {
    "src".to_string()
}

fn default_cache_folder() -> String {
    "cache".to_string()
}

fn default_true() -> bool {
    true
}

/// Glob patterns per source category, relative to the source folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePatterns {
    #[serde(default)]
    pub tuning: Vec<String>,
    #[serde(default)]
    pub simdata: Vec<String>,
    #[serde(default)]
    pub packages: Vec<String>,
}

/// The config file as written by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub build_name: String,
    #[serde(default = "default_source_folder")]
    pub source_folder: String,
    #[serde(default)]
    pub source_patterns: SourcePatterns,
    #[serde(default)]
    pub build_folders: Vec<String>,
    #[serde(default = "default_cache_folder")]
    pub cache_folder: String,
    #[serde(default = "default_true")]
    pub use_cache: bool,
    #[serde(default = "default_true")]
    pub fail_fast: bool,
}

impl ProjectConfig {
    /// Parse a config from JSON text
    ///
    /// # Errors
    /// Returns [`BuildError::Config`] if the JSON does not describe a project.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BuildError::Config(format!("invalid config: {e}")))
    }

    /// Load a config file from disk
    ///
    /// # Errors
    /// Returns [`BuildError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            BuildError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Resolve every path against `root` (the config file's directory)
    #[must_use]
    pub fn resolve(&self, root: &Path) -> BuildOptions {
        BuildOptions {
            build_name: self.build_name.clone(),
            source_folder: resolve_path(root, &self.source_folder),
            patterns: self.source_patterns.clone(),
            build_folders: self
                .build_folders
                .iter()
                .map(|folder| resolve_path(root, folder))
                .collect(),
            cache_folder: resolve_path(root, &self.cache_folder),
            use_cache: self.use_cache,
            fail_fast: self.fail_fast,
        }
    }
}

fn resolve_path(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Resolved settings for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Package file stem
    pub build_name: String,
    /// Root that source patterns are relative to
    pub source_folder: PathBuf,
    pub patterns: SourcePatterns,
    /// Every folder receives a copy of the package
    pub build_folders: Vec<PathBuf>,
    /// Folder holding `cache.json`
    pub cache_folder: PathBuf,
    /// Reuse and persist keys between builds
    pub use_cache: bool,
    /// Abort on the first per-file error instead of skipping the file
    pub fail_fast: bool,
}

impl BuildOptions {
    /// Load `path` and resolve it against its own directory
    ///
    /// # Errors
    /// Returns [`BuildError::Config`] if the file cannot be read or parsed.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = ProjectConfig::load(path)?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Ok(config.resolve(root))
    }

    #[must_use]
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// File name of the built package
    #[must_use]
    pub fn package_name(&self) -> String {
        format!("{}.package", self.build_name)
    }

    /// Location of the cache file
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.cache_folder.join(CACHE_FILE_NAME)
    }

    /// Pre-flight checks that must pass before any file is touched
    ///
    /// # Errors
    /// Returns [`BuildError::Config`] when no build folder is configured or
    /// the build name is not a plain file name.
    pub fn validate(&self) -> Result<()> {
        if self.build_folders.is_empty() {
            return Err(BuildError::Config(
                "the package cannot be written without at least one folder listed in 'buildFolders'"
                    .to_string(),
            ));
        }

        let name = self.build_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(BuildError::Config(format!(
                "'buildName' must be a plain file name, got {:?}",
                self.build_name
            )));
        }

        Ok(())
    }
}
