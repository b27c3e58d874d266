//! Local branch state: branch existence, deletion, and per-branch metadata.

use crate::{config::StoreBackend, constants::TRACKED_ISSUE_PATTERN, errors::SyncResult};
use std::{fmt::Display, path::Path, sync::Arc};

mod command;
pub use command::CommandStore;

mod repository;
pub use repository::RepositoryStore;

#[cfg(test)]
pub(crate) mod test_utils;

/// A per-branch metadata key.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum MetadataKey {
    /// The issue or pull request number associated with the branch.
    Issue,
    /// The branch this one is diffed against.
    DiffBranch,
    /// Set when the branch must be rebased before further work.
    NeedsRebase,
}

impl MetadataKey {
    /// The name of the key as stored in git config.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::DiffBranch => "diff-branch",
            Self::NeedsRebase => "needs-rebase",
        }
    }
}

impl Display for MetadataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and mutates branches and their metadata in local working copies.
///
/// A single store serves every directory; each call names the directory it operates in.
/// Implementations block the calling thread.
pub trait BranchStore: Send + Sync {
    /// Returns whether `branch` exists locally in `dir`.
    fn branch_exists(&self, dir: &Path, branch: &str) -> SyncResult<bool>;

    /// Force-deletes the local `branch` in `dir`, discarding its metadata.
    fn delete_branch(&self, dir: &Path, branch: &str) -> SyncResult<()>;

    /// Reads a metadata value of `branch`.
    ///
    /// ## Returns
    /// - `Ok(Some(value))` - The key is set.
    /// - `Ok(None)` - The key is not set.
    /// - `Err(_)` - The store could not be queried.
    fn get_metadata(&self, dir: &Path, branch: &str, key: MetadataKey)
        -> SyncResult<Option<String>>;

    /// Sets a metadata value of `branch`.
    fn set_metadata(&self, dir: &Path, branch: &str, key: MetadataKey, value: &str)
        -> SyncResult<()>;

    /// Removes a metadata value of `branch`. Removing an unset key succeeds.
    fn unset_metadata(&self, dir: &Path, branch: &str, key: MetadataKey) -> SyncResult<()>;

    /// Returns every `(name, value)` config entry in `dir` whose name matches the regular
    /// expression `pattern`.
    fn query_metadata(&self, dir: &Path, pattern: &str) -> SyncResult<Vec<(String, String)>>;
}

/// Creates the [BranchStore] for the configured backend.
pub fn open_store(backend: StoreBackend) -> Arc<dyn BranchStore> {
    match backend {
        StoreBackend::Twig => Arc::new(CommandStore::default()),
        StoreBackend::Git => Arc::new(RepositoryStore),
    }
}

/// Collects the issue numbers tracked by branches in `dir`.
///
/// Values that are not integers are skipped. Fails only if the store cannot be queried.
pub fn tracked_issues(store: &dyn BranchStore, dir: &Path) -> SyncResult<Vec<u64>> {
    let entries = store.query_metadata(dir, TRACKED_ISSUE_PATTERN)?;
    Ok(entries
        .iter()
        .filter_map(|(_, value)| value.trim().parse::<u64>().ok())
        .collect())
}

/// Splits `git config --get-regexp` output into `(name, value)` pairs.
///
/// Lines without a value are dropped.
pub(crate) fn parse_config_entries(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| line.split_once(' '))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
