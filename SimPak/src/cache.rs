//! Persistent key cache
//!
//! Maps each source path to the key it resolved to in a previous build, along
//! with the name it declared and an MD5 digest of its bytes. A record is only
//! reused while the digest still matches, so edited files are always parsed
//! again.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use simmodels::key::ResourceKey;

use crate::config::BuildOptions;
use crate::error::{BuildError, Result};

/// Cached resolution of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    /// Key the file resolved to
    pub key: ResourceKey,
    /// Declared name for tuning, referenced tuning name for SimData
    pub name: String,
    /// MD5 hex digest of the file bytes
    pub hash: String,
}

impl CacheRecord {
    /// The record, if it is still valid for a file whose digest is `hash`
    #[must_use]
    pub fn matching(&self, hash: &str) -> Option<&Self> {
        (self.hash == hash).then_some(self)
    }
}

/// Cache contents, ordered by path
pub type CacheMap = BTreeMap<PathBuf, CacheRecord>;

/// MD5 hex digest used to validate cache records
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

// On-disk format

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    keys: Vec<StoredRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    filepath: String,
    #[serde(default)]
    tuning_name: String,
    #[serde(default)]
    hash: String,
    key: StoredKey,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredKey {
    Fields {
        #[serde(rename = "type")]
        resource_type: u32,
        group: u32,
        instance: StoredInstance,
    },
    Text(String),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredInstance {
    Number(u64),
    Text(String),
}

impl StoredKey {
    fn from_key(key: &ResourceKey) -> Self {
        StoredKey::Fields {
            resource_type: key.resource_type,
            group: key.group,
            instance: StoredInstance::Text(key.instance.to_string()),
        }
    }

    fn to_key(&self) -> Option<ResourceKey> {
        match self {
            StoredKey::Fields {
                resource_type,
                group,
                instance,
            } => {
                let instance = match instance {
                    StoredInstance::Number(n) => *n,
                    StoredInstance::Text(s) => s.trim().parse().ok()?,
                };
                Some(ResourceKey::new(*resource_type, *group, instance))
            }
            StoredKey::Text(s) => s.parse().ok(),
        }
    }
}

/// Loads and saves `cache.json`
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
    enabled: bool,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
        }
    }

    #[must_use]
    pub fn from_options(options: &BuildOptions) -> Self {
        Self::new(options.cache_path(), options.use_cache)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Load the cache, falling back to an empty one
    ///
    /// Never fails: a disabled cache, a missing file or a corrupt file all
    /// produce an empty map and a warning.
    #[must_use]
    pub fn load(&self) -> CacheMap {
        match self.try_load() {
            Ok(records) => {
                tracing::debug!(
                    "Loaded {} cache record(s) from {}",
                    records.len(),
                    self.path.display()
                );
                records
            }
            Err(e) => {
                tracing::warn!("{}; building without cached keys", e);
                CacheMap::new()
            }
        }
    }

    /// Load the cache
    ///
    /// # Errors
    /// Returns [`BuildError::CacheLoad`] if caching is disabled or the file is
    /// missing or unreadable.
    pub fn try_load(&self) -> Result<CacheMap> {
        if !self.enabled {
            return Err(BuildError::CacheLoad("caching is disabled".to_string()));
        }

        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| BuildError::CacheLoad(format!("{}: {e}", self.path.display())))?;
        let file: CacheFile = serde_json::from_str(&json)
            .map_err(|e| BuildError::CacheLoad(format!("{}: {e}", self.path.display())))?;

        let mut records = CacheMap::new();
        for stored in file.keys {
            let Some(key) = stored.key.to_key() else {
                tracing::warn!("Ignoring cache record with an invalid key: {}", stored.filepath);
                continue;
            };
            records.insert(
                PathBuf::from(stored.filepath),
                CacheRecord {
                    key,
                    name: stored.tuning_name,
                    hash: stored.hash,
                },
            );
        }

        Ok(records)
    }

    /// Save the records whose path is in `seen`
    ///
    /// Does nothing when caching is disabled. Write failures are logged.
    pub fn save(&self, records: &CacheMap, seen: &HashSet<PathBuf>) {
        if !self.enabled {
            return;
        }

        match self.try_save(records, seen) {
            Ok(count) => {
                tracing::debug!("Saved {} cache record(s) to {}", count, self.path.display());
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }

    /// Save the records whose path is in `seen`, returning how many were written
    ///
    /// # Errors
    /// Returns [`BuildError::CacheSave`] if the cache folder or file cannot be
    /// written.
    pub fn try_save(&self, records: &CacheMap, seen: &HashSet<PathBuf>) -> Result<usize> {
        let file = CacheFile {
            keys: records
                .iter()
                .filter(|(path, _)| seen.contains(*path))
                .map(|(path, record)| StoredRecord {
                    filepath: path.to_string_lossy().into_owned(),
                    tuning_name: record.name.clone(),
                    hash: record.hash.clone(),
                    key: StoredKey::from_key(&record.key),
                })
                .collect(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| BuildError::CacheSave(format!("{}: {e}", parent.display())))?;
        }

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| BuildError::CacheSave(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| BuildError::CacheSave(format!("{}: {e}", self.path.display())))?;

        Ok(file.keys.len())
    }
}
