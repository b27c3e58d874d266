//! Wire models for the GitHub REST API responses `prsync` consumes.

use super::{IssueSummary, PullRequest, PullRequestState};
use serde::{Deserialize, Serialize};

/// Query parameters of `GET /issues`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ListIssuesParams {
    pub(crate) filter: &'static str,
    pub(crate) state: &'static str,
    pub(crate) sort: &'static str,
    pub(crate) page: u32,
    pub(crate) per_page: u8,
}

impl ListIssuesParams {
    /// Parameters listing every issue created by the authenticated user, most recently
    /// updated first.
    pub(crate) const fn created_by_me(page: u32, per_page: u8) -> Self {
        Self {
            filter: "created",
            state: "all",
            sort: "updated",
            page,
            per_page,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRepository {
    pub(crate) name: String,
    pub(crate) owner: ApiUser,
}

/// An element of `GET /issues`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIssue {
    pub(crate) number: u64,
    /// Present only when the issue is a pull request.
    #[serde(default)]
    pub(crate) pull_request: Option<serde::de::IgnoredAny>,
    #[serde(default)]
    pub(crate) repository: Option<ApiRepository>,
}

impl From<ApiIssue> for IssueSummary {
    fn from(issue: ApiIssue) -> Self {
        let (owner, repository) = match issue.repository {
            Some(repo) => (Some(repo.owner.login), Some(repo.name)),
            None => (None, None),
        };
        Self {
            number: issue.number,
            is_pull_request: issue.pull_request.is_some(),
            owner,
            repository,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApiState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRef {
    #[serde(rename = "ref")]
    pub(crate) name: String,
}

/// The body of `GET /repos/{owner}/{repo}/pulls/{number}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) state: ApiState,
    pub(crate) head: ApiRef,
    pub(crate) base: ApiRef,
    #[serde(default)]
    pub(crate) user: Option<ApiUser>,
    #[serde(default)]
    pub(crate) mergeable: Option<bool>,
}

impl ApiPullRequest {
    /// Converts the wire model into a [PullRequest] of the given repository.
    pub(crate) fn into_pull_request(self, owner: &str, repository: &str) -> PullRequest {
        PullRequest {
            number: self.number,
            state: match self.state {
                ApiState::Open => PullRequestState::Open,
                ApiState::Closed => PullRequestState::Closed,
            },
            head_ref: self.head.name,
            base_ref: self.base.name,
            author_login: self.user.map(|u| u.login).unwrap_or_default(),
            mergeable: self.mergeable.into(),
            owner: owner.to_string(),
            repository: repository.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ApiIssue, ApiPullRequest};
    use crate::remote::{IssueSummary, Mergeability, PullRequestState};

    #[test]
    fn issue_listing_distinguishes_pull_requests() {
        let issues: Vec<ApiIssue> = serde_json::from_str(
            r#"[
                {
                    "number": 42,
                    "title": "Add feature x",
                    "pull_request": { "url": "https://api.github.com/repos/evie404/web-template/pulls/42" },
                    "repository": { "name": "web-template", "owner": { "login": "evie404" } }
                },
                {
                    "number": 7,
                    "title": "Bug report",
                    "repository": { "name": "web-template", "owner": { "login": "evie404" } }
                }
            ]"#,
        )
        .unwrap();

        let summaries = issues
            .into_iter()
            .map(IssueSummary::from)
            .collect::<Vec<_>>();

        assert_eq!(
            summaries[0],
            IssueSummary {
                number: 42,
                is_pull_request: true,
                owner: Some("evie404".to_string()),
                repository: Some("web-template".to_string()),
            }
        );
        assert!(!summaries[1].is_pull_request);
    }

    #[test]
    fn pull_request_detail_converts() {
        let pr: ApiPullRequest = serde_json::from_str(
            r#"{
                "number": 42,
                "state": "closed",
                "merged": true,
                "head": { "ref": "feature-x", "sha": "abc" },
                "base": { "ref": "main", "sha": "def" },
                "user": { "login": "alice", "id": 1 },
                "mergeable": null
            }"#,
        )
        .unwrap();

        let pr = pr.into_pull_request("evie404", "web-template");
        assert_eq!(pr.number, 42);
        assert_eq!(pr.state, PullRequestState::Closed);
        assert_eq!(pr.head_ref, "feature-x");
        assert_eq!(pr.base_ref, "main");
        assert_eq!(pr.author_login, "alice");
        assert_eq!(pr.mergeable, Mergeability::Unknown);
        assert_eq!(pr.owner, "evie404");
        assert_eq!(pr.repository, "web-template");
    }

    #[test]
    fn missing_author_yields_empty_login() {
        let pr: ApiPullRequest = serde_json::from_str(
            r#"{
                "number": 3,
                "state": "open",
                "head": { "ref": "a" },
                "base": { "ref": "b" },
                "user": null,
                "mergeable": false
            }"#,
        )
        .unwrap();

        let pr = pr.into_pull_request("o", "r");
        assert_eq!(pr.author_login, "");
        assert_eq!(pr.mergeable, Mergeability::Conflicting);
    }
}
