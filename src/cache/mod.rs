// Cache module for local filesystem caching.
// Stores the fetched issue list and the GraphQL schema per repository.

pub mod paths;
pub mod store;

pub use paths::CacheLayout;
pub use store::{
    load_issues, read_json, read_schema, store_issues, write_json, write_schema,
};
