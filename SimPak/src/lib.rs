//! # SimPak
//!
//! Builds Sims 4 mod packages from tuning XML, SimData XML and pre-built
//! packages, and unpacks packages back into a source tree.
//!
//! ## Quick Start
//!
//! ### Building a Project
//!
//! ```no_run
//! use simpak::prelude::*;
//!
//! let options = BuildOptions::from_config_file("simpak-config.json".as_ref())?;
//! let report = build(&options)?;
//! println!("{} entries written to {}", report.entry_count(), report.package_name);
//! # Ok::<(), simpak::BuildError>(())
//! ```
//!
//! ### Extracting a Package
//!
//! ```no_run
//! use simpak::extract::extract_package;
//!
//! let report = extract_package("MyMod.package".as_ref(), "unpacked".as_ref())?;
//! println!("{} tuning file(s)", report.tuning.len());
//! # Ok::<(), simpak::BuildError>(())
//! ```
//!
//! ## Keys
//!
//! A tuning's key is `(type from its i attribute, group from a .G<hex> file
//! name suffix, instance from its s attribute)`. A SimData's key is the
//! SimData type, the SimData group of its tuning's type, and its tuning's
//! instance. Keys are cached in `cache.json` between builds.
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `simpak` command-line binary

pub mod build;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod resolver;
pub mod sources;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use error::{BuildError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::build::{BuildReport, build};
    pub use crate::cache::{CacheRecord, CacheStore};
    pub use crate::config::{BuildOptions, ProjectConfig};
    pub use crate::error::{BuildError, Result};
    pub use crate::extract::{ExtractReport, extract_package};
    pub use crate::resolver::KeyResolver;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
