// GitHub API module.
// GraphQL client, wire types, schema caching and issue retrieval.

pub mod client;
pub mod issues;
pub mod schema;
pub mod types;

pub use client::{GITHUB_GRAPHQL_ENDPOINT, GitHubClient};
pub use issues::{fetch_all_issues, issues_query, normalize};
pub use schema::load_or_fetch_schema;
