// Runtime settings.
// Everything an action needs to know about where to fetch from and cache to.

use std::path::PathBuf;

use crate::auth::default_credentials_path;
use crate::cache::CacheLayout;
use crate::error::Result;
use crate::github::GITHUB_GRAPHQL_ENDPOINT;

pub const DEFAULT_OWNER: &str = "waynew";
pub const DEFAULT_REPO: &str = "upgraded-octo-umbrella";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub owner: String,
    pub repo: String,
    pub cache: CacheLayout,
    pub endpoint: String,
    /// Explicit credentials file; `~/.gittoken` when unset.
    pub credentials_path: Option<PathBuf>,
}

impl Settings {
    /// Settings for `owner/repo` with default cache, endpoint and credentials.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            cache: CacheLayout::default(),
            endpoint: GITHUB_GRAPHQL_ENDPOINT.to_string(),
            credentials_path: None,
        }
    }

    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache = CacheLayout::new(root);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Credentials file to read, resolving the home-directory default lazily.
    pub fn credentials_path(&self) -> Result<PathBuf> {
        match &self.credentials_path {
            Some(path) => Ok(path.clone()),
            None => default_credentials_path(),
        }
    }
}
