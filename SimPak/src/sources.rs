//! Source file discovery

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::BuildOptions;
use crate::error::{BuildError, Result};

/// Source files of a build, by category, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFiles {
    pub tuning: Vec<PathBuf>,
    pub simdata: Vec<PathBuf>,
    pub packages: Vec<PathBuf>,
}

impl SourceFiles {
    /// Every tuning and SimData path, for cache pruning
    pub fn xml_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.tuning.iter().chain(&self.simdata)
    }

    /// Total number of files across all categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.tuning.len() + self.simdata.len() + self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Expand glob patterns relative to `root`
///
/// Matches are returned pattern by pattern, each pattern's matches in glob's
/// sorted order. Paths matched by several patterns are kept once, at their
/// first position. Directories are skipped.
///
/// # Errors
/// Returns [`BuildError::Config`] for an invalid pattern.
pub fn find_files(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let full_pattern = root.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();
        let paths = glob::glob(&full_pattern)
            .map_err(|e| BuildError::Config(format!("invalid glob pattern '{pattern}': {e}")))?;

        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    if seen.insert(path.clone()) {
                        files.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping unreadable path {}: {}", e.path().display(), e),
            }
        }
    }

    Ok(files)
}

/// Find every source file of a build
///
/// # Errors
/// Returns [`BuildError::Config`] for an invalid pattern, or
/// [`BuildError::ClassificationConflict`] naming the first path that is both
/// tuning and SimData.
pub fn discover(options: &BuildOptions) -> Result<SourceFiles> {
    let root = &options.source_folder;
    let files = SourceFiles {
        tuning: find_files(root, &options.patterns.tuning)?,
        simdata: find_files(root, &options.patterns.simdata)?,
        packages: find_files(root, &options.patterns.packages)?,
    };

    check_classification(&files)?;

    tracing::debug!(
        "Found {} tuning, {} SimData, {} package file(s)",
        files.tuning.len(),
        files.simdata.len(),
        files.packages.len()
    );

    Ok(files)
}

/// A file must not be both tuning and SimData
///
/// # Errors
/// Returns [`BuildError::ClassificationConflict`] for the first SimData path
/// that is also a tuning path.
pub fn check_classification(files: &SourceFiles) -> Result<()> {
    let tuning: HashSet<&PathBuf> = files.tuning.iter().collect();
    match files.simdata.iter().find(|path| tuning.contains(path)) {
        Some(path) => Err(BuildError::ClassificationConflict { path: path.clone() }),
        None => Ok(()),
    }
}
