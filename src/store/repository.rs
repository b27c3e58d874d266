//! [BranchStore] backed by libgit2.
//!
//! Metadata lives in the repository's git config as `branch.<name>.<key>`, the same layout
//! `twig` writes, so the two stores can be swapped freely.

use super::{BranchStore, MetadataKey};
use crate::errors::SyncResult;
use git2::{BranchType, ErrorCode, Repository};
use std::path::Path;

/// Reads and writes branches and branch metadata in-process.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct RepositoryStore;

impl RepositoryStore {
    fn open(dir: &Path) -> SyncResult<Repository> {
        Repository::open(dir).map_err(Into::into)
    }
}

/// Returns the git config name of a branch metadata entry.
fn config_name(branch: &str, key: MetadataKey) -> String {
    format!("branch.{}.{}", branch, key.as_str())
}

impl BranchStore for RepositoryStore {
    fn branch_exists(&self, dir: &Path, branch: &str) -> SyncResult<bool> {
        let repository = Self::open(dir)?;
        let exists = match repository.find_branch(branch, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        };
        exists
    }

    fn delete_branch(&self, dir: &Path, branch: &str) -> SyncResult<()> {
        let repository = Self::open(dir)?;
        repository
            .find_branch(branch, BranchType::Local)?
            .delete()?;
        Ok(())
    }

    fn get_metadata(
        &self,
        dir: &Path,
        branch: &str,
        key: MetadataKey,
    ) -> SyncResult<Option<String>> {
        let config = Self::open(dir)?.config()?;
        match config.get_string(&config_name(branch, key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_metadata(
        &self,
        dir: &Path,
        branch: &str,
        key: MetadataKey,
        value: &str,
    ) -> SyncResult<()> {
        let mut config = Self::open(dir)?.config()?;
        config.set_str(&config_name(branch, key), value)?;
        Ok(())
    }

    fn unset_metadata(&self, dir: &Path, branch: &str, key: MetadataKey) -> SyncResult<()> {
        let mut config = Self::open(dir)?.config()?;
        match config.remove(&config_name(branch, key)) {
            Err(e) if e.code() != ErrorCode::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn query_metadata(&self, dir: &Path, pattern: &str) -> SyncResult<Vec<(String, String)>> {
        let config = Self::open(dir)?.config()?;
        let mut entries = config.entries(Some(pattern))?;

        let mut pairs = Vec::new();
        while let Some(entry) = entries.next() {
            let entry = entry?;
            if let (Some(name), Some(value)) = (entry.name(), entry.value()) {
                pairs.push((name.to_string(), value.to_string()));
            }
        }
        Ok(pairs)
    }
}
