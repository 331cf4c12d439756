// Action runner.
// Ties credentials, fetching, caching and reporting together for one invocation.

use tracing::info;

use crate::auth::load_credentials;
use crate::cache::{load_issues, store_issues};
use crate::config::Settings;
use crate::error::Result;
use crate::github::{GitHubClient, fetch_all_issues, load_or_fetch_schema};
use crate::issue::IssueRecord;
use crate::report::LeadTimeReport;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fetch every issue and replace the cache.
    Cache,
    /// Report from the cache, optionally refreshing it first.
    Report { refresh: bool },
}

impl Action {
    fn fetches(&self) -> bool {
        matches!(self, Action::Cache | Action::Report { refresh: true })
    }
}

/// Fetch all issues for the configured repository and overwrite the cache.
///
/// The cache is only written once every page has been fetched, so a failed
/// fetch leaves the previous cache untouched.
pub async fn refresh_cache(settings: &Settings) -> Result<Vec<IssueRecord>> {
    let credentials = load_credentials(&settings.credentials_path()?)?;
    let mut client = GitHubClient::new(&settings.endpoint, credentials)?;

    load_or_fetch_schema(&mut client, &settings.cache, &settings.owner, &settings.repo).await?;
    let issues = fetch_all_issues(&mut client, &settings.owner, &settings.repo).await?;

    store_issues(&settings.cache, &settings.owner, &settings.repo, &issues)?;
    info!(
        count = issues.len(),
        path = %settings.cache.issues_path(&settings.owner, &settings.repo).display(),
        "cached issues"
    );
    Ok(issues)
}

/// Run `action`, returning the report when one was requested.
pub async fn run(settings: &Settings, action: Action) -> Result<Option<LeadTimeReport>> {
    let issues = if action.fetches() {
        refresh_cache(settings).await?
    } else {
        load_issues(&settings.cache, &settings.owner, &settings.repo)?
    };

    match action {
        Action::Cache => Ok(None),
        Action::Report { .. } => LeadTimeReport::compute(&issues).map(Some),
    }
}
