// Issue record model.
// The normalized, flat shape that is cached on disk and fed to the reporter.

use serde::{Deserialize, Serialize};

/// Issue state as reported by GitHub at fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// GraphQL enum literal for this state.
    pub fn as_literal(&self) -> &'static str {
        match self {
            IssueState::Open => "OPEN",
            IssueState::Closed => "CLOSED",
        }
    }
}

/// A single issue, normalized from a GraphQL issue node.
///
/// Timestamps are kept as the ISO-8601 strings GitHub returns so the cache
/// file round-trips byte-for-byte through load and store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub title: String,
    pub number: u64,
    pub state: IssueState,
    pub is_closed: bool,
    pub closed_timestamp: Option<String>,
    pub created_timestamp: String,
    #[serde(default)]
    pub labels: Vec<String>,
}
