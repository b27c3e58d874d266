//! `tracked` subcommand.

use crate::{
    config::{Config, StoreBackend},
    store::{open_store, tracked_issues},
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// CLI arguments for the `tracked` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct TrackedCmd {
    /// Path to the local repository.
    #[clap(index = 1, default_value = ".")]
    dir: PathBuf,
    /// Metadata store to read from. Defaults to the configured store.
    #[clap(long, value_enum)]
    store: Option<StoreBackend>,
}

impl TrackedCmd {
    /// Run the `tracked` subcommand.
    pub fn run(self, config: Option<&Config>) -> Result<()> {
        let backend = self
            .store
            .or(config.map(|c| c.store))
            .unwrap_or_default();

        let issues = tracked_issues(open_store(backend).as_ref(), &self.dir)?;
        for issue in issues {
            println!("{}", issue);
        }
        Ok(())
    }
}
