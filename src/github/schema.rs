// GraphQL schema caching.
// Read-through cache of the introspected GitHub schema, one copy per repository.

use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{CacheLayout, read_schema, write_schema};
use crate::error::Result;

use super::client::GitHubClient;

/// Types the issues query relies on.
const REQUIRED_TYPES: &[&str] = &["Repository", "Issue", "IssueState", "Label"];

/// Standard introspection query.
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types { ...FullType }
    directives { name description locations args { ...InputValue } }
  }
}
fragment FullType on __Type {
  kind name description
  fields(includeDeprecated: true) {
    name description
    args { ...InputValue }
    type { ...TypeRef }
    isDeprecated deprecationReason
  }
  inputFields { ...InputValue }
  interfaces { ...TypeRef }
  enumValues(includeDeprecated: true) { name description isDeprecated deprecationReason }
  possibleTypes { ...TypeRef }
}
fragment InputValue on __InputValue {
  name description
  type { ...TypeRef }
  defaultValue
}
fragment TypeRef on __Type {
  kind name
  ofType { kind name ofType { kind name ofType { kind name ofType { kind name
    ofType { kind name ofType { kind name ofType { kind name ofType { kind name } } } } } } } }
}"#;

/// Load the schema from the cache, or download and cache it on a miss.
pub async fn load_or_fetch_schema(
    client: &mut GitHubClient,
    layout: &CacheLayout,
    owner: &str,
    repo: &str,
) -> Result<Value> {
    info!("Loading schema from disk...");
    let schema = match read_schema(layout, owner, repo)? {
        Some(schema) => schema,
        None => {
            info!("No cached schema, loading schema from GitHub...");
            let schema: Value = client.execute(INTROSPECTION_QUERY).await?;
            write_schema(layout, owner, repo, &schema)?;
            schema
        }
    };

    let missing = missing_types(&schema);
    if !missing.is_empty() {
        warn!(?missing, "schema does not describe every type the issues query uses");
    }
    Ok(schema)
}

/// Names from [`REQUIRED_TYPES`] absent from `schema`.
pub fn missing_types(schema: &Value) -> Vec<&'static str> {
    let names: Vec<&str> = schema["__schema"]["types"]
        .as_array()
        .map(|types| types.iter().filter_map(|t| t["name"].as_str()).collect())
        .unwrap_or_default();

    REQUIRED_TYPES
        .iter()
        .copied()
        .filter(|required| !names.contains(required))
        .collect()
}
