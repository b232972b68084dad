//! Package extraction
//!
//! Unpacks a package into a source tree:
//!
//! ```text
//! destination/
//!   xml/<i attribute or misc>/<name>[.G<group>].xml
//!   xml/<tuning folder or misc>/<name>.SimData.xml
//!   packages/<package file name>
//! ```
//!
//! Entries that are neither tuning nor SimData, and tuning or SimData entries
//! that do not parse as XML, are kept together in the pass-through package.
//! Folders are a best guess: a package does not record where its sources
//! lived.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use simmodels::enums::{BinaryResourceType, is_tuning_type};
use simmodels::formatting::format_resource_group;
use simmodels::package::{Package, PackageEntry, ReadOptions};
use simmodels::xml::{parse_simdata_xml, parse_tuning_xml};

use crate::error::{BuildError, Result};

/// Folder for extracted XML
pub const XML_DIR: &str = "xml";

/// Folder for the pass-through package
pub const PACKAGES_DIR: &str = "packages";

/// Folder used when a tuning has no type attribute, or a SimData has no
/// matching tuning in the package
pub const MISC_FOLDER: &str = "misc";

/// Summary of an extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Tuning files written
    pub tuning: Vec<PathBuf>,
    /// SimData files written
    pub simdata: Vec<PathBuf>,
    /// Entries kept in the pass-through package
    pub other_count: usize,
    /// The pass-through package, if any entries were left over
    pub package: Option<PathBuf>,
}

/// Name without any namespace prefix (`creator:my_trait` becomes `my_trait`)
#[must_use]
pub fn strip_name_prefix(name: &str) -> &str {
    match name.split_once(':') {
        Some((prefix, rest)) if !prefix.is_empty() => rest,
        _ => name,
    }
}

/// Whether `name` is usable as a single path component
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// File name of an extracted tuning, or `None` if the name is not a plain
/// file name
#[must_use]
pub fn tuning_file_name(name: &str, group: u32) -> Option<String> {
    let name = strip_name_prefix(name);
    if !is_plain_name(name) {
        return None;
    }
    if group == 0 {
        Some(format!("{name}.xml"))
    } else {
        Some(format!("{name}.G{}.xml", format_resource_group(group)))
    }
}

/// File name of an extracted SimData, or `None` if the name is not a plain
/// file name
#[must_use]
pub fn simdata_file_name(name: &str) -> Option<String> {
    let name = strip_name_prefix(name);
    is_plain_name(name).then(|| format!("{name}.SimData.xml"))
}

/// A type attribute usable as a single folder name
fn subfolder_for(type_attr: Option<&str>) -> &str {
    match type_attr.map(str::trim) {
        Some(attr) if is_plain_name(attr) => attr,
        _ => MISC_FOLDER,
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BuildError::from(e).in_file(parent))?;
    }
    std::fs::write(path, bytes).map_err(|e| BuildError::from(e).in_file(path))
}

/// Extract a package file into `destination`
///
/// # Errors
/// Returns an error if the package cannot be read or a file cannot be written.
pub fn extract_package(package_path: &Path, destination: &Path) -> Result<ExtractReport> {
    let bytes =
        std::fs::read(package_path).map_err(|e| BuildError::from(e).in_file(package_path))?;
    let file_name = package_path
        .file_name()
        .map_or_else(|| "extracted.package".to_string(), |n| n.to_string_lossy().into_owned());

    extract_bytes(&bytes, &file_name, destination).map_err(|e| {
        if matches!(e, BuildError::Parse(_)) {
            e.in_file(package_path)
        } else {
            e
        }
    })
}

/// Extract a package buffer into `destination`
///
/// `package_name` names the pass-through package of leftover entries.
///
/// # Errors
/// Returns an error if the buffer is not a package or a file cannot be written.
pub fn extract_bytes(
    bytes: &[u8],
    package_name: &str,
    destination: &Path,
) -> Result<ExtractReport> {
    let entries = Package::extract_entries(bytes, ReadOptions { load_raw: true })?;

    let mut tunings = Vec::new();
    let mut simdatas = Vec::new();
    let mut others = Vec::new();

    for entry in entries {
        let resource_type = entry.key.resource_type;
        if resource_type == BinaryResourceType::SimData.as_u32() {
            simdatas.push(entry);
        } else if is_tuning_type(resource_type) {
            tunings.push(entry);
        } else {
            others.push(entry);
        }
    }

    let xml_dir = destination.join(XML_DIR);
    let mut report = ExtractReport::default();
    let mut subfolders: HashMap<String, String> = HashMap::new();

    for entry in tunings {
        let parsed = entry
            .bytes()
            .map_err(BuildError::from)
            .and_then(|b| parse_tuning_xml(&b).map_err(BuildError::from));

        match parsed {
            Ok(tuning) => {
                let Some(file_name) = tuning_file_name(tuning.name(), entry.key.group) else {
                    tracing::warn!(
                        "Keeping tuning {} packed: {:?} is not a file name",
                        entry.key,
                        tuning.name()
                    );
                    others.push(entry);
                    continue;
                };
                let subfolder = subfolder_for(tuning.type_attr()).to_string();
                let path = xml_dir.join(&subfolder).join(file_name);
                write_file(&path, tuning.as_bytes())?;
                tracing::debug!("{} -> {}", entry.key, path.display());

                subfolders.insert(tuning.name().to_string(), subfolder);
                report.tuning.push(path);
            }
            Err(e) => {
                tracing::warn!("Keeping tuning {} packed: {}", entry.key, e);
                others.push(entry);
            }
        }
    }

    for entry in simdatas {
        let parsed = entry
            .bytes()
            .map_err(BuildError::from)
            .and_then(|b| parse_simdata_xml(&b).map_err(BuildError::from));

        match parsed {
            Ok(simdata) => {
                let Some(file_name) = simdata_file_name(&simdata.instance_name) else {
                    tracing::warn!(
                        "Keeping SimData {} packed: {:?} is not a file name",
                        entry.key,
                        simdata.instance_name
                    );
                    others.push(entry);
                    continue;
                };
                let subfolder = subfolders
                    .get(&simdata.instance_name)
                    .map_or(MISC_FOLDER, String::as_str);
                let path = xml_dir.join(subfolder).join(file_name);
                write_file(&path, simdata.as_bytes())?;
                tracing::debug!("{} -> {}", entry.key, path.display());

                report.simdata.push(path);
            }
            Err(e) => {
                tracing::warn!("Keeping SimData {} packed: {}", entry.key, e);
                others.push(entry);
            }
        }
    }

    report.other_count = others.len();
    if !others.is_empty() {
        report.package = Some(write_leftovers(others, package_name, destination)?);
    }

    Ok(report)
}

fn write_leftovers(
    entries: Vec<PackageEntry>,
    package_name: &str,
    destination: &Path,
) -> Result<PathBuf> {
    let mut package = Package::new();
    package.add_all(entries);

    let file_name = Path::new(package_name)
        .file_name()
        .map_or_else(|| PathBuf::from("extracted.package"), PathBuf::from);
    let path = destination.join(PACKAGES_DIR).join(file_name);

    write_file(&path, &package.to_bytes()?)?;
    tracing::debug!("{} leftover entry(s) -> {}", package.len(), path.display());
    Ok(path)
}
