//! The synchronization engine: fans pages of the issue listing out to concurrent tasks and
//! applies every tracked pull request to its local directories.

use crate::{
    config::RepoMapping,
    errors::SyncResult,
    remote::{PullRequestSource, PullRequest},
};
use std::{path::PathBuf, sync::Arc};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

mod apply;
pub use apply::BranchApplier;

mod report;
pub use report::{BranchAction, PageOutcome, SyncReport};

/// Synchronizes one user's pull requests on one host.
pub struct Synchronizer {
    source: Arc<dyn PullRequestSource>,
    mapping: Arc<RepoMapping>,
    applier: Arc<BranchApplier>,
    pages_to_check: u32,
    per_page: u8,
}

impl Synchronizer {
    /// Creates a new [Synchronizer].
    pub fn new(
        source: Arc<dyn PullRequestSource>,
        mapping: Arc<RepoMapping>,
        applier: Arc<BranchApplier>,
        pages_to_check: u32,
        per_page: u8,
    ) -> Self {
        Self {
            source,
            mapping,
            applier,
            pages_to_check,
            per_page,
        }
    }

    /// Synchronizes pages `1..=pages_to_check` concurrently and waits for all of them.
    ///
    /// A page that fails, or whose task panics, does not affect the others.
    pub async fn synchronize(self: Arc<Self>) -> SyncReport {
        let mut tasks = JoinSet::new();
        for page in 1..=self.pages_to_check {
            let this = Arc::clone(&self);
            tasks.spawn(async move { this.sync_page(page).await });
        }

        let mut report = SyncReport::default();
        let mut finished = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    finished.push(outcome.page);
                    report.pages.push(outcome);
                }
                Err(e) => warn!(error = %e, "page task aborted"),
            }
        }

        report.pages.sort_by_key(|outcome| outcome.page);
        report.aborted_pages = (1..=self.pages_to_check)
            .filter(|page| !finished.contains(page))
            .collect();
        report
    }

    /// Synchronizes every tracked pull request on one page of the issue listing, in listing
    /// order.
    pub async fn sync_page(&self, page: u32) -> PageOutcome {
        let mut outcome = PageOutcome::new(page);

        let issues = match self.source.list_issues(page, self.per_page).await {
            Ok(issues) => issues,
            Err(e) => {
                warn!(page, error = %e, "failed to list issues");
                outcome.listing_failed = true;
                return outcome;
            }
        };
        debug!(page, count = issues.len(), "listed issues");

        for issue in issues.into_iter().filter(|issue| issue.is_pull_request) {
            outcome.pull_requests += 1;

            let (Some(owner), Some(repository)) = (issue.owner, issue.repository) else {
                outcome.untracked += 1;
                continue;
            };
            let Some(dirs) = self.mapping.locate(&owner, &repository) else {
                trace!(%owner, %repository, number = issue.number, "repository not tracked");
                outcome.untracked += 1;
                continue;
            };

            let pr = match self
                .source
                .pull_request(&owner, &repository, issue.number)
                .await
            {
                Ok(pr) => Arc::new(pr),
                Err(e) => {
                    warn!(%owner, %repository, number = issue.number, error = %e, "failed to fetch pull request");
                    outcome.failed += 1;
                    continue;
                }
            };

            for dir in dirs {
                match self.apply_blocking(Arc::clone(&pr), dir.clone()).await {
                    Ok(action) => outcome.record(action),
                    Err(e) => {
                        warn!(
                            dir = %dir.display(),
                            number = pr.number,
                            error = %e,
                            "failed to synchronize branch '{}'",
                            pr.head_ref
                        );
                        outcome.failed += 1;
                    }
                }
            }
        }

        outcome
    }

    /// Runs the [BranchApplier] on the blocking thread pool.
    async fn apply_blocking(&self, pr: Arc<PullRequest>, dir: PathBuf) -> SyncResult<BranchAction> {
        let applier = Arc::clone(&self.applier);
        tokio::task::spawn_blocking(move || applier.apply(&pr, &dir)).await?
    }
}
