//! Octocrab implementation of the [PullRequestSource].

use super::{
    models::{ApiIssue, ApiPullRequest, ListIssuesParams},
    IssueSummary, PullRequest, PullRequestSource,
};
use crate::{
    config::Credentials,
    errors::{SyncError, SyncResult},
};
use async_trait::async_trait;
use octocrab::Octocrab;

/// Octocrab-backed pull request source.
pub struct OctocrabSource {
    client: Octocrab,
}

impl OctocrabSource {
    /// Creates a new source from an Octocrab client.
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated client for the given [Credentials].
    pub fn for_credentials(credentials: &Credentials) -> SyncResult<Self> {
        let mut builder = Octocrab::builder().personal_token(credentials.token.clone());
        if let Some(api_base) = credentials.api_base.as_deref() {
            builder = builder
                .base_uri(api_base)
                .map_err(|e| remote_error("client", &e))?;
        }
        let client = builder.build().map_err(|e| remote_error("client", &e))?;

        Ok(Self::new(client))
    }
}

#[async_trait]
impl PullRequestSource for OctocrabSource {
    async fn list_issues(&self, page: u32, per_page: u8) -> SyncResult<Vec<IssueSummary>> {
        let params = ListIssuesParams::created_by_me(page, per_page);
        let issues = self
            .client
            .get::<Vec<ApiIssue>, _, _>("/issues", Some(&params))
            .await
            .map_err(|e| remote_error(&format!("issues page {}", page), &e))?;

        Ok(issues.into_iter().map(IssueSummary::from).collect())
    }

    async fn pull_request(
        &self,
        owner: &str,
        repository: &str,
        number: u64,
    ) -> SyncResult<PullRequest> {
        let route = format!("/repos/{}/{}/pulls/{}", owner, repository, number);
        let pr = self
            .client
            .get::<ApiPullRequest, _, _>(route, None::<&()>)
            .await
            .map_err(|e| remote_error(&format!("{}/{}#{}", owner, repository, number), &e))?;

        Ok(pr.into_pull_request(owner, repository))
    }
}

/// Wraps an Octocrab failure into a [SyncError::Remote].
fn remote_error(context: &str, error: &dyn std::fmt::Display) -> SyncError {
    SyncError::Remote {
        context: context.to_string(),
        message: error.to_string(),
    }
}
