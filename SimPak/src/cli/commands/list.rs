//! CLI command for listing package contents

use std::path::Path;

use simmodels::enums::resource_type_name;
use simmodels::package::{CompressionType, Package, ReadOptions, ResourceData};

/// Format byte size for human-readable output
fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}K", bytes as f64 / 1024.0)
    } else {
        format!("{bytes}")
    }
}

pub fn execute(source: &Path, detailed: bool, count: bool) -> anyhow::Result<()> {
    let package = Package::read(source, ReadOptions { load_raw: true })?;

    if count {
        println!("{}", package.len());
        return Ok(());
    }

    if !detailed {
        for entry in package.entries() {
            println!("{}", entry.key);
        }
        return Ok(());
    }

    println!(
        "{:<35}  {:<24}  {:>10}  {:>10}  COMPRESSION",
        "KEY", "TYPE", "SIZE", "STORED"
    );

    let mut total_size = 0u64;
    let mut total_stored = 0u64;

    for entry in package.entries() {
        let (size, stored, compression) = match &entry.data {
            ResourceData::Raw(raw) => (
                u64::from(raw.decompressed_size),
                raw.data.len() as u64,
                raw.compression,
            ),
            ResourceData::Decoded(bytes) => {
                (bytes.len() as u64, bytes.len() as u64, CompressionType::Uncompressed)
            }
        };
        total_size += size;
        total_stored += stored;

        println!(
            "{:<35}  {:<24}  {:>10}  {:>10}  {}",
            entry.key.to_string(),
            resource_type_name(entry.key.resource_type).unwrap_or("unknown"),
            format_size(size),
            format_size(stored),
            compression.as_str()
        );
    }

    println!();
    println!(
        "{} entries, {} total ({} stored)",
        package.len(),
        format_size(total_size),
        format_size(total_stored)
    );

    Ok(())
}
