// git-scrape library.
// Fetches a repository's issues over GitHub GraphQL, caches them on disk,
// and reports on issue lead times.

pub mod app;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod graphql;
pub mod issue;
pub mod report;

pub use error::{Result, ScrapeError};
