//! Command execution implementations

use super::Commands;
use super::{build, extract, list};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Build {
                config,
                no_cache,
                tolerant,
                quiet,
            } => build::execute(config, *no_cache, *tolerant, *quiet),
            Commands::Extract {
                source,
                destination,
                quiet,
            } => extract::execute(source, destination, *quiet),
            Commands::List {
                source,
                detailed,
                count,
            } => list::execute(source, *detailed, *count),
        }
    }
}
