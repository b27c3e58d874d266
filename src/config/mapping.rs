//! Mapping from remote repositories to local working copies.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

/// An immutable `owner -> repository -> [local directory]` lookup table.
///
/// Keys are matched exactly and case-sensitively. Directory lists keep the order they were
/// configured in, which is the order directories are synchronized in.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoMapping(BTreeMap<String, BTreeMap<String, Vec<PathBuf>>>);

impl RepoMapping {
    /// Looks up the local directories of a remote repository.
    ///
    /// ## Takes
    /// - `owner` - The login of the repository owner.
    /// - `repository` - The name of the repository.
    ///
    /// ## Returns
    /// - `Some(&[PathBuf])` - The local directories checked out from the repository.
    /// - `None` - If the owner or the repository is not tracked.
    pub fn locate(&self, owner: &str, repository: &str) -> Option<&[PathBuf]> {
        self.0
            .get(owner)
            .and_then(|repos| repos.get(repository))
            .map(Vec::as_slice)
    }

    /// Returns `true` if no repository is tracked.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }
}

impl<const N: usize> From<[(&str, &str, &[&str]); N]> for RepoMapping {
    fn from(entries: [(&str, &str, &[&str]); N]) -> Self {
        let mut owners: BTreeMap<String, BTreeMap<String, Vec<PathBuf>>> = BTreeMap::new();
        for (owner, repository, dirs) in entries {
            owners
                .entry(owner.to_string())
                .or_default()
                .entry(repository.to_string())
                .or_default()
                .extend(dirs.iter().map(PathBuf::from));
        }
        Self(owners)
    }
}
