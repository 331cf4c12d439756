// GitHub GraphQL response types.
// Defines structs for deserializing the issues query and response envelope.

use serde::Deserialize;

use crate::error::{Result, ScrapeError};
use crate::issue::IssueState;

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorMessage>,
}

/// A single entry of the `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap `data`, turning any reported errors into [`ScrapeError::GraphQl`].
    pub fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            return Err(ScrapeError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data
            .ok_or_else(|| ScrapeError::Other("GraphQL response carried no data".to_string()))
    }
}

/// `data` of the issues query.
#[derive(Debug, Deserialize)]
pub struct IssuesData {
    pub repository: Option<RepositoryIssues>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryIssues {
    pub issues: IssueConnection,
}

/// One page of the repository issues connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueConnection {
    pub page_info: PageInfo,
    #[serde(default)]
    pub nodes: Vec<IssueNode>,
}

/// Cursor pagination info.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
}

/// Raw issue node as returned by GitHub.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub title: String,
    pub number: u64,
    pub state: IssueState,
    pub closed: bool,
    pub closed_at: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub labels: Option<LabelConnection>,
}

/// First page of an issue's labels.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelConnection {
    #[serde(default)]
    pub edges: Vec<LabelEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelEdge {
    pub node: Label,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_page_deserializes() {
        let body = json!({
            "data": {
                "repository": {
                    "issues": {
                        "pageInfo": {"endCursor": "Y3Vyc29yOjE="},
                        "nodes": [{
                            "title": "Broken build",
                            "number": 12,
                            "state": "CLOSED",
                            "closed": true,
                            "closedAt": "2020-01-03T00:00:00Z",
                            "createdAt": "2020-01-01T00:00:00Z",
                            "labels": {"edges": [{"node": {"name": "ci"}}]}
                        }]
                    }
                }
            }
        });

        let response: GraphQlResponse<IssuesData> = serde_json::from_value(body).unwrap();
        let page = response.into_data().unwrap().repository.unwrap().issues;
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("Y3Vyc29yOjE="));
        assert_eq!(page.nodes.len(), 1);
        assert_eq!(page.nodes[0].state, IssueState::Closed);
        assert_eq!(page.nodes[0].labels.as_ref().unwrap().edges[0].node.name, "ci");
    }

    #[test]
    fn test_errors_take_precedence() {
        let body = json!({
            "data": null,
            "errors": [{"message": "Could not resolve to a Repository"}]
        });

        let response: GraphQlResponse<IssuesData> = serde_json::from_value(body).unwrap();
        let err = response.into_data().unwrap_err();
        assert!(matches!(err, ScrapeError::GraphQl(ref m) if m.len() == 1));
    }

    #[test]
    fn test_missing_data_is_error() {
        let response: GraphQlResponse<IssuesData> = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(response.into_data(), Err(ScrapeError::Other(_))));
    }
}
