// Issue retrieval.
// Builds the paginated issues query and normalizes nodes into issue records.

use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::graphql::{Field, Query, Value};
use crate::issue::{IssueRecord, IssueState};

use super::client::GitHubClient;
use super::types::{IssueNode, IssuesData};

/// Issues requested per page; GitHub's maximum.
pub const ISSUE_PAGE_SIZE: i64 = 100;

/// Labels requested per issue. Labels beyond the first page are not fetched.
pub const LABEL_PAGE_SIZE: i64 = 100;

/// Build the query for one page of issues, starting after `after`.
pub fn issues_query(owner: &str, repo: &str, after: Option<&str>) -> Query {
    let states = Value::List(
        [IssueState::Open, IssueState::Closed]
            .iter()
            .map(|s| Value::Enum(s.as_literal().to_string()))
            .collect(),
    );

    let labels = Field::new("labels")
        .arg("first", LABEL_PAGE_SIZE)
        .select(Field::new("edges").select(Field::new("node").scalars(&["name"])));

    let nodes = Field::new("nodes")
        .scalars(&["title", "number", "state", "closed", "closedAt", "createdAt"])
        .select(labels);

    let issues = Field::new("issues")
        .arg("first", ISSUE_PAGE_SIZE)
        .arg("states", states)
        .arg_opt("after", after)
        .select(Field::new("pageInfo").scalars(&["endCursor"]))
        .select(nodes);

    Query::new().select(
        Field::new("repository")
            .arg("owner", owner)
            .arg("name", repo)
            .select(issues),
    )
}

/// Flatten a raw issue node into an [`IssueRecord`].
///
/// `closedAt` is dropped for issues that are not closed, so a reopened issue
/// never carries a stale close time.
pub fn normalize(node: IssueNode) -> IssueRecord {
    let labels = node
        .labels
        .unwrap_or_default()
        .edges
        .into_iter()
        .map(|edge| edge.node.name)
        .collect();

    IssueRecord {
        title: node.title,
        number: node.number,
        state: node.state,
        is_closed: node.closed,
        closed_timestamp: if node.closed { node.closed_at } else { None },
        created_timestamp: node.created_at,
        labels,
    }
}

/// Fetch every open and closed issue of `owner/repo`, in server order.
///
/// Pages are requested until GitHub reports no end cursor.
pub async fn fetch_all_issues(
    client: &mut GitHubClient,
    owner: &str,
    repo: &str,
) -> Result<Vec<IssueRecord>> {
    let mut issues = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        if let Some(after) = &cursor {
            info!("Loading after {}", after);
        }

        let query = issues_query(owner, repo, cursor.as_deref()).render();
        let data: IssuesData = client.execute(&query).await?;
        let connection = data
            .repository
            .ok_or_else(|| ScrapeError::NotFound(format!("{}/{}", owner, repo)))?
            .issues;

        pages += 1;
        issues.extend(connection.nodes.into_iter().map(normalize));

        match connection.page_info.end_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    info!(pages, count = issues.len(), "fetched issues for {}/{}", owner, repo);
    Ok(issues)
}
