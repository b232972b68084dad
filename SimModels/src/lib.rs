//! # SimModels
//!
//! A pure-Rust library for the resource formats of Sims 4 mods.
//!
//! ## Supported Formats
//!
//! - **DBPF packages** - Read and write `.package` archives
//! - **Tuning XML** - Root element name, type and instance
//! - **SimData XML** - Instance name of a SimData document
//!
//! ## Quick Start
//!
//! ```no_run
//! use simmodels::prelude::*;
//!
//! let bytes = std::fs::read("my_trait.xml")?;
//! let tuning = parse_tuning_xml(&bytes)?;
//! let tuning_type = TuningResourceType::parse_attr(tuning.type_attr().unwrap_or_default());
//!
//! let mut pkg = Package::new();
//! if let Some(tuning_type) = tuning_type {
//!     let key = ResourceKey::new(tuning_type.as_u32(), 0, tuning.instance);
//!     pkg.add(key, tuning.into_bytes());
//! }
//! std::fs::write("build.package", pkg.to_bytes()?)?;
//! # Ok::<(), simmodels::Error>(())
//! ```

pub mod enums;
pub mod error;
pub mod formatting;
pub mod key;
pub mod package;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::enums::{BinaryResourceType, SimDataGroup, TuningResourceType};
    pub use crate::error::{Error, Result};
    pub use crate::formatting::{format_resource_group, format_resource_key};
    pub use crate::key::ResourceKey;
    pub use crate::package::{Package, PackageEntry, ReadOptions, ResourceData};
    pub use crate::xml::{SimDataDocument, TuningDocument, parse_simdata_xml, parse_tuning_xml};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
