//! `sync` subcommand.

use crate::{
    config::{Config, Credentials, Host},
    errors::SyncError,
    remote::OctocrabSource,
    store::open_store,
    sync::{BranchApplier, Synchronizer},
};
use anyhow::Result;
use clap::Args;
use nu_ansi_term::Color;
use std::sync::Arc;
use tracing::info;

/// CLI arguments for the `sync` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct SyncCmd {
    /// Only synchronize this host. Defaults to every configured host.
    #[clap(long, value_enum)]
    host: Option<Host>,
}

impl SyncCmd {
    /// Run the `sync` subcommand.
    pub async fn run(self, config: Config) -> Result<()> {
        let hosts = match self.host {
            Some(host) if config.host(host).is_none() => {
                return Err(SyncError::HostNotConfigured(host.to_string()).into())
            }
            Some(host) => vec![host],
            None => config.configured_hosts(),
        };

        // Resolve every credential before touching anything.
        let credentials = hosts
            .iter()
            .map(|host| Ok((*host, Credentials::from_env(*host)?)))
            .collect::<Result<Vec<_>, SyncError>>()?;

        let store = open_store(config.store);
        for (host, credentials) in credentials {
            let Some(host_cfg) = config.host(host) else {
                continue;
            };

            let source = OctocrabSource::for_credentials(&credentials)?;
            let applier = BranchApplier::new(host_cfg.username.clone(), Arc::clone(&store));
            let synchronizer = Arc::new(Synchronizer::new(
                Arc::new(source),
                Arc::new(host_cfg.repos.clone()),
                Arc::new(applier),
                config.pages_to_check,
                config.per_page,
            ));

            info!(%host, username = %host_cfg.username, "synchronizing pull requests");
            let report = synchronizer.synchronize().await;

            println!("{}: {}", Color::Yellow.bold().paint(host.to_string()), report);
        }

        Ok(())
    }
}
