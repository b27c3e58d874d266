//! Brings one local directory in line with one pull request.

use super::report::{BranchAction, SkipReason};
use crate::{
    errors::SyncResult,
    remote::{PullRequest, PullRequestState},
    store::{BranchStore, MetadataKey},
};
use std::{path::Path, sync::Arc};
use tracing::{debug, info, trace};

/// Applies the local state implied by a pull request to a working copy.
///
/// Every step is idempotent, so the applier can be run for every (pull request, directory)
/// pair on every run.
pub struct BranchApplier {
    /// Only pull requests authored by this login are acted upon.
    username: String,
    store: Arc<dyn BranchStore>,
}

impl BranchApplier {
    /// Creates a new [BranchApplier] acting on behalf of `username`.
    pub fn new(username: impl Into<String>, store: Arc<dyn BranchStore>) -> Self {
        Self {
            username: username.into(),
            store,
        }
    }

    /// Synchronizes `pr`'s head branch in `dir`.
    ///
    /// ## Takes
    /// - `pr` - The pull request to synchronize.
    /// - `dir` - A local working copy of the pull request's repository.
    ///
    /// ## Returns
    /// - `Ok(BranchAction)` - What was done to the directory.
    /// - `Err(_)` - If reading the `issue` entry or any mutation failed.
    pub fn apply(&self, pr: &PullRequest, dir: &Path) -> SyncResult<BranchAction> {
        if pr.author_login != self.username {
            trace!(number = pr.number, author = %pr.author_login, "skipping foreign pull request");
            return Ok(BranchAction::Skipped(SkipReason::ForeignAuthor));
        }

        let branch = pr.head_ref.as_str();
        match self.store.branch_exists(dir, branch) {
            Ok(true) => {}
            Ok(false) => {
                trace!(branch, dir = %dir.display(), "branch not found locally");
                return Ok(BranchAction::Skipped(SkipReason::BranchMissing));
            }
            Err(e) => {
                debug!(branch, dir = %dir.display(), error = %e, "branch lookup failed");
                return Ok(BranchAction::Skipped(SkipReason::BranchMissing));
            }
        }

        match pr.state {
            PullRequestState::Closed => self.delete_closed(pr, dir),
            PullRequestState::Open => self.reconcile_open(pr, dir),
        }
    }

    fn delete_closed(&self, pr: &PullRequest, dir: &Path) -> SyncResult<BranchAction> {
        info!(dir = %dir.display(), "deleting branch '{}'", pr.head_ref);
        self.store.delete_branch(dir, &pr.head_ref)?;
        Ok(BranchAction::Deleted)
    }

    fn reconcile_open(&self, pr: &PullRequest, dir: &Path) -> SyncResult<BranchAction> {
        let branch = pr.head_ref.as_str();
        let number = pr.number.to_string();

        // A failed read aborts the directory rather than being mistaken for an unset issue.
        let current = self.store.get_metadata(dir, branch, MetadataKey::Issue)?;
        let issue_updated = current.as_deref().map(str::trim) != Some(number.as_str());
        if issue_updated {
            info!(dir = %dir.display(), number = pr.number, "setting PR for branch '{}'", branch);
            self.store
                .set_metadata(dir, branch, MetadataKey::Issue, &number)?;
        }

        self.store
            .set_metadata(dir, branch, MetadataKey::DiffBranch, &pr.base_ref)?;

        let needs_rebase = pr.mergeable.needs_rebase();
        if needs_rebase {
            info!(dir = %dir.display(), "setting needs-rebase for branch '{}'", branch);
            self.store
                .set_metadata(dir, branch, MetadataKey::NeedsRebase, "true")?;
        } else {
            self.store
                .unset_metadata(dir, branch, MetadataKey::NeedsRebase)?;
        }

        Ok(BranchAction::Reconciled {
            issue_updated,
            needs_rebase,
        })
    }
}
