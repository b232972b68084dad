//! CLI command for unpacking a package

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{DISK, PACKAGE, print_done, print_step};
use crate::extract::extract_package;

pub fn execute(source: &Path, destination: &Path, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, 2, PACKAGE, &format!("Unpacking {}...", source.display()));
    }

    let report = extract_package(source, destination)?;

    if !quiet {
        print_step(
            2,
            2,
            DISK,
            &format!(
                "Wrote {} tuning and {} SimData file(s) to {}",
                report.tuning.len(),
                report.simdata.len(),
                destination.display()
            ),
        );
        if let Some(package) = &report.package {
            println!("      {} other entr(ies) kept in {}", report.other_count, package.display());
        }
        print_done(started.elapsed());
    }

    Ok(())
}
