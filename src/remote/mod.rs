//! Access to pull requests on the code-hosting service.

use crate::{constants::UNKNOWN_MERGEABILITY_NEEDS_REBASE, errors::SyncResult};
use async_trait::async_trait;

mod gateway;
pub use gateway::OctocrabSource;

mod models;

/// Source of the configured user's issues and pull requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Lists one page of issues and pull requests created by the authenticated user, in any
    /// state, most recently updated first.
    async fn list_issues(&self, page: u32, per_page: u8) -> SyncResult<Vec<IssueSummary>>;

    /// Fetches the full detail of a pull request.
    async fn pull_request(
        &self,
        owner: &str,
        repository: &str,
        number: u64,
    ) -> SyncResult<PullRequest>;
}

/// An entry of the issue listing. Pull requests show up here as issues.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IssueSummary {
    /// The issue or pull request number.
    pub number: u64,
    /// Whether the issue is a pull request.
    pub is_pull_request: bool,
    /// The login of the owner of the repository the issue belongs to.
    pub owner: Option<String>,
    /// The name of the repository the issue belongs to.
    pub repository: Option<String>,
}

/// State of a pull request. Merged pull requests are [PullRequestState::Closed].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PullRequestState {
    Open,
    Closed,
}

/// Whether a pull request's head merges cleanly into its base.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mergeability {
    Mergeable,
    Conflicting,
    /// GitHub has not finished computing mergeability.
    Unknown,
}

impl Mergeability {
    /// Returns whether the branch should be flagged as needing a rebase.
    pub const fn needs_rebase(self) -> bool {
        match self {
            Self::Mergeable => false,
            Self::Conflicting => true,
            Self::Unknown => UNKNOWN_MERGEABILITY_NEEDS_REBASE,
        }
    }
}

impl From<Option<bool>> for Mergeability {
    fn from(mergeable: Option<bool>) -> Self {
        match mergeable {
            Some(true) => Self::Mergeable,
            Some(false) => Self::Conflicting,
            None => Self::Unknown,
        }
    }
}

/// Full detail of a pull request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PullRequest {
    /// The pull request number.
    pub number: u64,
    /// Whether the pull request is open or closed.
    pub state: PullRequestState,
    /// The branch the changes live on.
    pub head_ref: String,
    /// The branch the changes target.
    pub base_ref: String,
    /// The login of the author. Empty if the account no longer exists.
    pub author_login: String,
    /// Whether the head merges cleanly into the base.
    pub mergeable: Mergeability,
    /// The login of the repository owner.
    pub owner: String,
    /// The name of the repository.
    pub repository: String,
}
