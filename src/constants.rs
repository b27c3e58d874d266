//! Constants for the `prsync` application.

/// Name of the configuration file, resolved against `$HOME`.
pub(crate) const PRSYNC_CFG_FILE_NAME: &str = ".prsync.toml";

/// Number of issue-listing pages fetched concurrently per run.
pub(crate) const DEFAULT_PAGES_TO_CHECK: u32 = 3;

/// Number of issues requested per page.
pub(crate) const DEFAULT_PER_PAGE: u8 = 20;

/// Upper bound GitHub accepts for `per_page`.
pub(crate) const MAX_PER_PAGE: u8 = 100;

/// Whether a pull request whose mergeability GitHub has not computed yet is flagged as needing a
/// rebase. GitHub reports `null` until its background job finishes, so an unknown value is
/// treated like a mergeable one.
pub(crate) const UNKNOWN_MERGEABILITY_NEEDS_REBASE: bool = false;

/// Pattern matching every `issue` metadata entry in a repository's git config.
pub(crate) const TRACKED_ISSUE_PATTERN: &str = r"branch\..+\.issue";

pub(crate) const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
pub(crate) const GHE_TOKEN_VAR: &str = "GHE_TOKEN";
pub(crate) const GHE_URL_VAR: &str = "GHE_URL";

/// Path suffix of the REST API root on GitHub Enterprise hosts.
pub(crate) const GHE_API_SUFFIX: &str = "/api/v3";
