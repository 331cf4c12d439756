// Error types for git-scrape.
// Covers transport, GraphQL, credential, cache and report failures.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Malformed credentials in {}: expected `<login> <token>`", .0.display())]
    MalformedCredentials(PathBuf),

    #[error("Cannot locate home directory for the credentials file")]
    NoHomeDir,

    #[error("Issue #{number} is closed but has no closed timestamp")]
    MissingClosedTimestamp { number: u64 },

    #[error("No cached issues at {}", .0.display())]
    CacheMiss(PathBuf),

    #[error("No issues to report on")]
    NoIssues,

    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
