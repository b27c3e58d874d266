//! In-memory [BranchStore] that records every call, for tests.

use super::{BranchStore, MetadataKey};
use crate::errors::{SyncError, SyncResult};
use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// A call made against a [RecordingStore].
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Call {
    Exists(String),
    Delete(String),
    Get(String, MetadataKey),
    Set(String, MetadataKey, String),
    Unset(String, MetadataKey),
    Query(String),
}

impl Call {
    pub(crate) const fn is_mutation(&self) -> bool {
        matches!(self, Self::Delete(_) | Self::Set(..) | Self::Unset(..))
    }
}

#[derive(Default)]
struct State {
    branches: BTreeSet<(PathBuf, String)>,
    metadata: BTreeMap<(PathBuf, String, String), String>,
    calls: Vec<(PathBuf, Call)>,
    failing_dirs: HashSet<PathBuf>,
    fail_reads: bool,
    fail_queries: bool,
    fail_exists: bool,
}

/// Absent keys read as `None` and unset cleanly, as [BranchStore] requires of every backend.
#[derive(Default)]
pub(crate) struct RecordingStore {
    state: Mutex<State>,
}

fn injected(what: &str) -> SyncError {
    SyncError::Io(io::Error::other(format!("injected {} failure", what)))
}

impl RecordingStore {
    pub(crate) fn add_branch(&self, dir: &str, branch: &str) {
        self.state
            .lock()
            .unwrap()
            .branches
            .insert((PathBuf::from(dir), branch.to_string()));
    }

    pub(crate) fn insert_metadata(&self, dir: &str, branch: &str, key: &str, value: &str) {
        self.state.lock().unwrap().metadata.insert(
            (PathBuf::from(dir), branch.to_string(), key.to_string()),
            value.to_string(),
        );
    }

    pub(crate) fn metadata(&self, dir: &str, branch: &str, key: MetadataKey) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .metadata
            .get(&(PathBuf::from(dir), branch.to_string(), key.as_str().to_string()))
            .cloned()
    }

    pub(crate) fn has_branch(&self, dir: &str, branch: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .branches
            .contains(&(PathBuf::from(dir), branch.to_string()))
    }

    /// Every metadata entry of every directory, for comparing whole-store snapshots.
    pub(crate) fn snapshot(&self) -> BTreeMap<(PathBuf, String, String), String> {
        self.state.lock().unwrap().metadata.clone()
    }

    /// Calls made in `dir`, in order.
    pub(crate) fn calls_in(&self, dir: &str) -> Vec<Call> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(d, _)| d == Path::new(dir))
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Makes every call in `dir` fail.
    pub(crate) fn fail_dir(&self, dir: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_dirs
            .insert(PathBuf::from(dir));
    }

    pub(crate) fn fail_reads(&self) {
        self.state.lock().unwrap().fail_reads = true;
    }

    pub(crate) fn fail_queries(&self) {
        self.state.lock().unwrap().fail_queries = true;
    }

    pub(crate) fn fail_exists(&self) {
        self.state.lock().unwrap().fail_exists = true;
    }

    /// Records `call` and returns the locked state, or an error if `dir` is set to fail.
    fn record(&self, dir: &Path, call: Call) -> SyncResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((dir.to_path_buf(), call));
        if state.failing_dirs.contains(dir) {
            return Err(injected("directory"));
        }
        Ok(state)
    }
}

impl BranchStore for RecordingStore {
    fn branch_exists(&self, dir: &Path, branch: &str) -> SyncResult<bool> {
        let state = self.record(dir, Call::Exists(branch.to_string()))?;
        if state.fail_exists {
            return Err(injected("exists"));
        }
        Ok(state
            .branches
            .contains(&(dir.to_path_buf(), branch.to_string())))
    }

    fn delete_branch(&self, dir: &Path, branch: &str) -> SyncResult<()> {
        let mut state = self.record(dir, Call::Delete(branch.to_string()))?;
        if !state.branches.remove(&(dir.to_path_buf(), branch.to_string())) {
            return Err(injected("delete"));
        }
        state
            .metadata
            .retain(|(d, b, _), _| !(d == dir && b == branch));
        Ok(())
    }

    fn get_metadata(
        &self,
        dir: &Path,
        branch: &str,
        key: MetadataKey,
    ) -> SyncResult<Option<String>> {
        let state = self.record(dir, Call::Get(branch.to_string(), key))?;
        if state.fail_reads {
            return Err(injected("read"));
        }
        Ok(state
            .metadata
            .get(&(
                dir.to_path_buf(),
                branch.to_string(),
                key.as_str().to_string(),
            ))
            .cloned())
    }

    fn set_metadata(
        &self,
        dir: &Path,
        branch: &str,
        key: MetadataKey,
        value: &str,
    ) -> SyncResult<()> {
        let mut state = self.record(
            dir,
            Call::Set(branch.to_string(), key, value.to_string()),
        )?;
        state.metadata.insert(
            (
                dir.to_path_buf(),
                branch.to_string(),
                key.as_str().to_string(),
            ),
            value.to_string(),
        );
        Ok(())
    }

    fn unset_metadata(&self, dir: &Path, branch: &str, key: MetadataKey) -> SyncResult<()> {
        let mut state = self.record(dir, Call::Unset(branch.to_string(), key))?;
        state.metadata.remove(&(
            dir.to_path_buf(),
            branch.to_string(),
            key.as_str().to_string(),
        ));
        Ok(())
    }

    /// Supports patterns of the form `branch\..+\.<key>` only.
    fn query_metadata(&self, dir: &Path, pattern: &str) -> SyncResult<Vec<(String, String)>> {
        let state = self.record(dir, Call::Query(pattern.to_string()))?;
        if state.fail_queries {
            return Err(injected("query"));
        }
        let key = pattern.rsplit(r"\.").next().unwrap_or(pattern);
        Ok(state
            .metadata
            .iter()
            .filter(|((d, _, k), _)| d == dir && k == key)
            .map(|((_, b, k), v)| (format!("branch.{}.{}", b, k), v.clone()))
            .collect())
    }
}
