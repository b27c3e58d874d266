//! Configuration for the `prsync` application.

use crate::{
    constants::{DEFAULT_PAGES_TO_CHECK, DEFAULT_PER_PAGE, MAX_PER_PAGE, PRSYNC_CFG_FILE_NAME},
    errors::{SyncError, SyncResult},
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fmt::Display,
    path::{Path, PathBuf},
};

mod credentials;
pub use credentials::Credentials;

mod mapping;
pub use mapping::RepoMapping;

/// Returns the default path of the configuration file, `$HOME/.prsync.toml`.
///
/// ## Returns
/// - `Some(PathBuf)` - The path to the configuration file.
/// - `None` - If `$HOME` is not set.
pub fn default_cfg_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(PRSYNC_CFG_FILE_NAME))
}

/// A hosting environment that pull requests are synchronized from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, ValueEnum)]
pub enum Host {
    /// github.com
    Github,
    /// A GitHub Enterprise installation.
    Enterprise,
}

impl Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Github => write!(f, "github"),
            Self::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// The local metadata store implementation.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    /// Shell out to `twig` and `git`.
    #[default]
    Twig,
    /// Read and write git config in-process with libgit2.
    Git,
}

/// The `prsync` configuration file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Number of issue-listing pages fetched concurrently.
    #[serde(default = "default_pages_to_check")]
    pub pages_to_check: u32,
    /// Number of issues per page.
    #[serde(default = "default_per_page")]
    pub per_page: u8,
    /// The local metadata store implementation.
    #[serde(default)]
    pub store: StoreBackend,
    /// Settings for github.com.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<HostConfig>,
    /// Settings for a GitHub Enterprise installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise: Option<HostConfig>,
}

/// Per-host settings.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HostConfig {
    /// The login whose pull requests are synchronized.
    pub username: String,
    /// Where each remote repository is checked out locally.
    #[serde(default)]
    pub repos: RepoMapping,
}

const fn default_pages_to_check() -> u32 {
    DEFAULT_PAGES_TO_CHECK
}

const fn default_per_page() -> u8 {
    DEFAULT_PER_PAGE
}

impl Config {
    /// Loads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> SyncResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SyncError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&raw)
    }

    /// Parses and validates a configuration from its TOML source.
    pub fn parse(raw: &str) -> SyncResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the settings for `host`, if that host is configured.
    pub fn host(&self, host: Host) -> Option<&HostConfig> {
        match host {
            Host::Github => self.github.as_ref(),
            Host::Enterprise => self.enterprise.as_ref(),
        }
    }

    /// Returns every configured host, github.com first.
    pub fn configured_hosts(&self) -> Vec<Host> {
        [Host::Github, Host::Enterprise]
            .into_iter()
            .filter(|host| self.host(*host).is_some())
            .collect()
    }

    fn validate(&self) -> SyncResult<()> {
        if self.pages_to_check == 0 {
            return Err(SyncError::InvalidConfig(
                "`pages-to-check` must be at least 1".to_string(),
            ));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(SyncError::InvalidConfig(format!(
                "`per-page` must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }
        for host in self.configured_hosts() {
            if self.host(host).is_some_and(|cfg| cfg.username.trim().is_empty()) {
                return Err(SyncError::InvalidConfig(format!(
                    "`{}.username` must not be empty",
                    host
                )));
            }
        }
        Ok(())
    }
}
