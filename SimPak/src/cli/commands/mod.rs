use clap::Subcommand;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;

pub mod build;
pub mod execute;
pub mod extract;
pub mod list;

#[derive(Subcommand)]
pub enum Commands {
    /// Build the project's package
    Build {
        /// Project config file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Ignore and do not update the key cache
        #[arg(long)]
        no_cache: bool,

        /// Skip files that fail instead of stopping at the first error
        #[arg(long)]
        tolerant: bool,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Unpack a package into XML files and a leftover package
    Extract {
        /// Package file
        source: PathBuf,

        /// Output directory
        destination: PathBuf,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the entries of a package
    List {
        /// Package file
        source: PathBuf,

        /// Show type names, sizes and compression
        #[arg(short, long)]
        detailed: bool,

        /// Only show the number of entries
        #[arg(short, long)]
        count: bool,
    },
}
