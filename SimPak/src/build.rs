//! The build pipeline
//!
//! Steps, in order:
//! 1. Validate options and discover sources (fatal errors stop here, before
//!    anything is written)
//! 2. Load the key cache
//! 3. Resolve every tuning file, then every SimData file
//! 4. Merge pre-built packages
//! 5. Write the package to each build folder
//! 6. Save the key cache

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use simmodels::key::ResourceKey;
use simmodels::package::{Package, ReadOptions};
use simmodels::xml::{parse_simdata_xml, parse_tuning_xml};

use crate::cache::{CacheMap, CacheRecord, CacheStore, fingerprint};
use crate::config::BuildOptions;
use crate::error::{BuildError, Result};
use crate::resolver::KeyResolver;
use crate::sources::{self, SourceFiles};

/// Summary of a finished build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// File name of the written package
    pub package_name: String,
    /// Tuning resources added
    pub tuning_count: usize,
    /// SimData resources added
    pub simdata_count: usize,
    /// Pre-built packages merged
    pub merged_packages: usize,
    /// Entries taken from pre-built packages
    pub merged_entries: usize,
    /// Keys reused from the cache instead of parsing
    pub cached_count: usize,
    /// Files left out after an error (tolerant mode only)
    pub skipped: Vec<PathBuf>,
    /// Every package file written
    pub written: Vec<PathBuf>,
}

impl BuildReport {
    /// Total number of entries in the package
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.tuning_count + self.simdata_count + self.merged_entries
    }
}

/// Run a build
///
/// # Errors
/// Fatal configuration errors are returned before any file is written. In
/// fail-fast mode the first per-file error is returned, attributed to its
/// file. Errors writing a package are always returned.
pub fn build(options: &BuildOptions) -> Result<BuildReport> {
    options.validate()?;
    let files = sources::discover(options)?;

    let cache = CacheStore::from_options(options);
    let records = if cache.is_enabled() {
        cache.load()
    } else {
        CacheMap::new()
    };

    let mut builder = Builder::new(options, records);
    builder.build_tuning(&files.tuning)?;
    tracing::info!("Tuning built: {} resource(s)", builder.report.tuning_count);

    builder.build_simdata(&files.simdata)?;
    tracing::info!("SimData built: {} resource(s)", builder.report.simdata_count);

    builder.merge_packages(&files.packages)?;
    tracing::info!(
        "Packages merged: {} entry(s) from {} package(s)",
        builder.report.merged_entries,
        builder.report.merged_packages
    );

    builder.write_packages()?;

    cache.save(&builder.records, &seen_paths(&files));

    Ok(builder.report)
}

fn seen_paths(files: &SourceFiles) -> HashSet<PathBuf> {
    files.xml_paths().cloned().collect()
}

/// State of one build in progress
struct Builder<'a> {
    options: &'a BuildOptions,
    resolver: KeyResolver,
    package: Package,
    /// Cache loaded at start, updated with every resolved file
    records: CacheMap,
    report: BuildReport,
}

impl<'a> Builder<'a> {
    fn new(options: &'a BuildOptions, records: CacheMap) -> Self {
        Self {
            options,
            resolver: KeyResolver::new(),
            package: Package::new(),
            records,
            report: BuildReport {
                package_name: options.package_name(),
                ..BuildReport::default()
            },
        }
    }

    /// Apply the failure policy to a per-file error
    fn file_failed(&mut self, path: &Path, err: BuildError) -> Result<()> {
        let err = err.in_file(path);
        tracing::error!("{}", err);

        if self.options.fail_fast {
            return Err(err);
        }

        self.report.skipped.push(path.to_path_buf());
        Ok(())
    }

    /// A cache record still valid for `hash`, if caching is on
    fn cached(&self, path: &Path, hash: &str) -> Option<CacheRecord> {
        if !self.options.use_cache {
            return None;
        }
        self.records.get(path).and_then(|r| r.matching(hash)).cloned()
    }

    fn build_tuning(&mut self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            match self.tuning_entry(path) {
                Ok((key, bytes)) => {
                    self.package.add(key, bytes);
                    self.report.tuning_count += 1;
                }
                Err(e) => self.file_failed(path, e)?,
            }
        }
        Ok(())
    }

    fn tuning_entry(&mut self, path: &Path) -> Result<(ResourceKey, Vec<u8>)> {
        let bytes = std::fs::read(path)?;
        let hash = fingerprint(&bytes);

        let cached = self
            .cached(path, &hash)
            .filter(|record| simmodels::enums::is_tuning_type(record.key.resource_type));

        let (key, name) = if let Some(record) = cached {
            tracing::trace!("Using cached key for {}", path.display());
            let key = self.resolver.register_cached_tuning(&record.name, record.key)?;
            self.report.cached_count += 1;
            (key, record.name)
        } else {
            let tuning = parse_tuning_xml(&bytes)?;
            let key = self.resolver.resolve_tuning_key(path, &tuning)?;
            (key, tuning.name().to_string())
        };

        tracing::debug!("{} -> {} ({})", path.display(), key, name);
        self.records
            .insert(path.to_path_buf(), CacheRecord { key, name, hash });
        Ok((key, bytes))
    }

    fn build_simdata(&mut self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            match self.simdata_entry(path) {
                Ok((key, bytes)) => {
                    self.package.add(key, bytes);
                    self.report.simdata_count += 1;
                }
                Err(e) => self.file_failed(path, e)?,
            }
        }
        Ok(())
    }

    fn simdata_entry(&mut self, path: &Path) -> Result<(ResourceKey, Vec<u8>)> {
        let bytes = std::fs::read(path)?;
        let hash = fingerprint(&bytes);

        // Only the referenced name is taken from the cache; the key is
        // derived from the tuning map of this build
        let cached = self.cached(path, &hash);
        let name = match &cached {
            Some(record) => record.name.clone(),
            None => parse_simdata_xml(&bytes)?.instance_name,
        };
        let key = self.resolver.simdata_key_for(&name)?;
        if cached.is_some() {
            tracing::trace!("Using cached name for {}", path.display());
            self.report.cached_count += 1;
        }

        tracing::debug!("{} -> {} ({})", path.display(), key, name);
        self.records
            .insert(path.to_path_buf(), CacheRecord { key, name, hash });
        Ok((key, bytes))
    }

    fn merge_packages(&mut self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            let entries = std::fs::read(path)
                .map_err(BuildError::from)
                .and_then(|bytes| {
                    Package::extract_entries(&bytes, ReadOptions { load_raw: true })
                        .map_err(BuildError::from)
                });

            match entries {
                Ok(entries) => {
                    tracing::debug!("Merging {} entry(s) from {}", entries.len(), path.display());
                    self.report.merged_packages += 1;
                    self.report.merged_entries += entries.len();
                    self.package.add_all(entries);
                }
                Err(e) => self.file_failed(path, e)?,
            }
        }
        Ok(())
    }

    fn write_packages(&mut self) -> Result<()> {
        let bytes = self.package.to_bytes()?;
        let package_name = self.options.package_name();

        for folder in &self.options.build_folders {
            if !folder.exists() {
                std::fs::create_dir_all(folder)
                    .map_err(|e| BuildError::from(e).in_file(folder))?;
                tracing::info!("Created folder: {}", folder.display());
            }

            let target = folder.join(&package_name);
            std::fs::write(&target, &bytes).map_err(|e| BuildError::from(e).in_file(&target))?;
            tracing::info!("Wrote package: {}", target.display());
            self.report.written.push(target);
        }

        Ok(())
    }
}
