//! CLI command for building a project

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::build::build;
use crate::cli::progress::{DISK, GEAR, LOOKING_GLASS, print_done, print_step, print_warning};
use crate::config::BuildOptions;

pub fn execute(config: &Path, no_cache: bool, tolerant: bool, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, 3, LOOKING_GLASS, &format!("Reading {}...", config.display()));
    }

    let mut options = BuildOptions::from_config_file(config)
        .with_context(|| format!("Failed to load {}", config.display()))?;
    if no_cache {
        options = options.with_cache(false);
    }
    if tolerant {
        options = options.with_fail_fast(false);
    }

    if !quiet {
        print_step(2, 3, GEAR, &format!("Building {}...", options.package_name()));
    }

    let report = build(&options)?;

    if !quiet {
        print_step(
            3,
            3,
            DISK,
            &format!(
                "{} tuning, {} SimData, {} merged entr{} ({} cached key{})",
                report.tuning_count,
                report.simdata_count,
                report.merged_entries,
                if report.merged_entries == 1 { "y" } else { "ies" },
                report.cached_count,
                if report.cached_count == 1 { "" } else { "s" },
            ),
        );
        for path in &report.written {
            println!("      {}", path.display());
        }
        for path in &report.skipped {
            print_warning(&format!("Skipped {}", path.display()));
        }
        print_done(started.elapsed());
    }

    Ok(())
}
