//! Credentials and endpoints read from the environment.

use super::Host;
use crate::{
    constants::{GHE_API_SUFFIX, GHE_TOKEN_VAR, GHE_URL_VAR, GITHUB_TOKEN_VAR},
    errors::{SyncError, SyncResult},
};
use std::env;

/// Credentials for one hosting environment.
#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    /// The personal access token.
    pub(crate) token: String,
    /// The REST API root. [None] for github.com.
    pub(crate) api_base: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Credentials {
    /// Reads the credentials for `host` from the process environment.
    pub fn from_env(host: Host) -> SyncResult<Self> {
        Self::from_lookup(host, |name| env::var(name).ok())
    }

    /// Reads the credentials for `host` through `lookup`.
    ///
    /// ## Returns
    /// - `Ok(Credentials)` - If every variable the host needs is set and non-empty.
    /// - `Err(SyncError::MissingEnv)` - Naming the first variable that is missing.
    pub(crate) fn from_lookup<F>(host: Host, lookup: F) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(SyncError::MissingEnv(name))
        };

        match host {
            Host::Github => Ok(Self {
                token: require(GITHUB_TOKEN_VAR)?,
                api_base: None,
            }),
            Host::Enterprise => {
                let token = require(GHE_TOKEN_VAR)?;
                let url = require(GHE_URL_VAR)?;
                Ok(Self {
                    token,
                    api_base: Some(enterprise_api_base(&url)),
                })
            }
        }
    }
}

/// Normalizes a GitHub Enterprise URL to its REST API root.
fn enterprise_api_base(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.ends_with(GHE_API_SUFFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, GHE_API_SUFFIX)
    }
}

#[cfg(test)]
mod test {
    use super::{enterprise_api_base, Credentials};
    use crate::{config::Host, errors::SyncError};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn github_requires_token() {
        let err = Credentials::from_lookup(Host::Github, lookup(&[])).unwrap_err();
        assert!(matches!(err, SyncError::MissingEnv("GITHUB_TOKEN")));

        let creds =
            Credentials::from_lookup(Host::Github, lookup(&[("GITHUB_TOKEN", "abc")])).unwrap();
        assert_eq!(creds.token, "abc");
        assert_eq!(creds.api_base, None);
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let err =
            Credentials::from_lookup(Host::Github, lookup(&[("GITHUB_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, SyncError::MissingEnv("GITHUB_TOKEN")));
    }

    #[test]
    fn enterprise_requires_url() {
        let err = Credentials::from_lookup(Host::Enterprise, lookup(&[("GHE_TOKEN", "abc")]))
            .unwrap_err();
        assert!(matches!(err, SyncError::MissingEnv("GHE_URL")));
    }

    #[test]
    fn enterprise_url_is_normalized() {
        let creds = Credentials::from_lookup(
            Host::Enterprise,
            lookup(&[("GHE_TOKEN", "abc"), ("GHE_URL", "https://ghe.example.com/")]),
        )
        .unwrap();
        assert_eq!(
            creds.api_base.as_deref(),
            Some("https://ghe.example.com/api/v3")
        );
        assert_eq!(
            enterprise_api_base("https://ghe.example.com/api/v3/"),
            "https://ghe.example.com/api/v3"
        );
    }

    #[test]
    fn debug_output_redacts_token() {
        let creds =
            Credentials::from_lookup(Host::Github, lookup(&[("GITHUB_TOKEN", "secret")])).unwrap();
        assert!(!format!("{:?}", creds).contains("secret"));
    }
}
