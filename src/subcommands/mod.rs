//! The subcommands for the `prsync` application.

use crate::config::Config;
use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

mod sync;
pub use sync::SyncCmd;

mod tracked;
pub use tracked::TrackedCmd;

#[derive(Debug, Clone, Eq, PartialEq, Subcommand)]
pub enum Subcommands {
    /// Synchronize local branches with your pull requests.
    #[clap(alias = "s")]
    Sync(SyncCmd),
    /// List the issue numbers tracked by branches in a local repository.
    #[clap(alias = "t")]
    Tracked(TrackedCmd),
}

impl Subcommands {
    /// Run the subcommand with the configuration file at `cfg_path`.
    pub async fn run(self, cfg_path: &Path) -> Result<()> {
        match self {
            Self::Sync(args) => args.run(Config::load(cfg_path)?).await,
            Self::Tracked(args) => {
                let config = cfg_path.exists().then(|| Config::load(cfg_path)).transpose()?;
                args.run(config.as_ref())
            }
        }
    }
}
