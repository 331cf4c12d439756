// Credential loading.
// Reads the `<login> <token>` pair used for HTTP basic auth against GitHub.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{Result, ScrapeError};

/// File name of the credentials file inside the home directory.
pub const CREDENTIALS_FILE: &str = ".gittoken";

/// Identity and secret sent with every GraphQL request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub token: String,
}

// Keep the token out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Default credentials location: `~/.gittoken`.
pub fn default_credentials_path() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(CREDENTIALS_FILE))
        .ok_or(ScrapeError::NoHomeDir)
}

/// Load credentials from `path`.
///
/// A missing file surfaces as the underlying not-found IO error.
pub fn load_credentials(path: &Path) -> Result<Credentials> {
    let contents = fs::read_to_string(path)?;
    parse_credentials(&contents).ok_or_else(|| ScrapeError::MalformedCredentials(path.to_path_buf()))
}

/// Split file contents into exactly two whitespace-separated tokens.
fn parse_credentials(contents: &str) -> Option<Credentials> {
    let mut parts = contents.split_whitespace();
    let login = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Credentials {
        login: login.to_string(),
        token: token.to_string(),
    })
}
