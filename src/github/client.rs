// GitHub GraphQL HTTP client.
// Handles authentication, rate limiting, and request/response processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::auth::Credentials;
use crate::error::{Result, ScrapeError};

use super::types::{GraphQlResponse, RateLimit};

pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// GraphQL client with basic-auth credentials and rate limit tracking.
pub struct GitHubClient {
    client: Client,
    endpoint: String,
    credentials: Credentials,
    rate_limit: RateLimit,
}

impl GitHubClient {
    /// Create a client posting to `endpoint` as `credentials`.
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("git-scrape/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ScrapeError::Api)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            credentials,
            rate_limit: RateLimit::default(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the current rate limit information.
    pub fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Run a query and decode its `data` object.
    pub async fn execute<T: DeserializeOwned>(&mut self, query: &str) -> Result<T> {
        debug!(endpoint = %self.endpoint, query, "sending GraphQL query");

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.credentials.login, Some(&self.credentials.token))
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(ScrapeError::Api)?;

        self.update_rate_limit(&response);
        let response = self.check_response(response).await?;

        let envelope: GraphQlResponse<T> = response.json().await?;
        envelope.into_data()
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&mut self, response: &Response) {
        if let Some(limit) = header_u64(response, "x-ratelimit-limit") {
            self.rate_limit.limit = limit;
        }
        if let Some(remaining) = header_u64(response, "x-ratelimit-remaining") {
            self.rate_limit.remaining = remaining;
        }
        if let Some(reset) = header_u64(response, "x-ratelimit-reset") {
            self.rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ScrapeError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(ScrapeError::NotFound(url))
            }
            // Only this response's own headers mark a 403 as rate limiting.
            StatusCode::FORBIDDEN if header_u64(&response, "x-ratelimit-remaining") == Some(0) => {
                let reset_at = header_u64(&response, "x-ratelimit-reset")
                    .and_then(|reset| chrono::DateTime::from_timestamp(reset as i64, 0))
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(ScrapeError::RateLimited { reset_at })
            }
            status => Err(ScrapeError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}

/// Numeric value of a response header, if present and well formed.
fn header_u64(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials {
            login: "octocat".to_string(),
            token: "ghp_secret".to_string(),
        }
    }

    async fn client_for(server: &MockServer) -> GitHubClient {
        GitHubClient::new(&format!("{}/graphql", server.uri()), credentials()).unwrap()
    }

    #[tokio::test]
    async fn test_execute_posts_query_with_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header_exists("authorization"))
            .and(header("accept", "application/json"))
            .and(body_partial_json(json!({"query": "query { viewer { login } }"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-ratelimit-limit", "5000")
                    .insert_header("x-ratelimit-remaining", "4999")
                    .set_body_json(json!({"data": {"viewer": {"login": "octocat"}}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut client = client_for(&server).await;
        let data: Value = client.execute("query { viewer { login } }").await.unwrap();

        assert_eq!(data["viewer"]["login"], "octocat");
        assert_eq!(client.rate_limit().limit, 5000);
        assert_eq!(client.rate_limit().remaining, 4999);

        let requests = server.received_requests().await.unwrap();
        let auth = requests[0].headers.get("authorization").unwrap();
        assert!(auth.to_str().unwrap().starts_with("Basic "));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut client = client_for(&server).await;
        let result: Result<Value> = client.execute("query { viewer { login } }").await;
        assert!(matches!(result, Err(ScrapeError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1577836800"),
            )
            .mount(&server)
            .await;

        let mut client = client_for(&server).await;
        let result: Result<Value> = client.execute("query { viewer { login } }").await;
        match result {
            Err(ScrapeError::RateLimited { reset_at }) => assert_eq!(reset_at, "00:00:00"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_forbidden_without_rate_limit_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string("Resource protected by organization SAML enforcement"),
            )
            .mount(&server)
            .await;

        let mut client = client_for(&server).await;
        let result: Result<Value> = client.execute("query { viewer { login } }").await;
        match result {
            Err(ScrapeError::Other(message)) => {
                assert!(message.starts_with("HTTP 403 Forbidden"));
                assert!(message.contains("SAML enforcement"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_forbidden_with_remaining_quota() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "4000")
                    .set_body_string("missing scope"),
            )
            .mount(&server)
            .await;

        let mut client = client_for(&server).await;
        let result: Result<Value> = client.execute("query { viewer { login } }").await;
        assert!(matches!(result, Err(ScrapeError::Other(ref m)) if m.contains("missing scope")));
        assert_eq!(client.rate_limit().remaining, 4000);
    }

    #[tokio::test]
    async fn test_graphql_errors_surface() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{"message": "Something went wrong"}]
            })))
            .mount(&server)
            .await;

        let mut client = client_for(&server).await;
        let result: Result<Value> = client.execute("query { viewer { login } }").await;
        match result {
            Err(ScrapeError::GraphQl(messages)) => {
                assert_eq!(messages, vec!["Something went wrong".to_string()])
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_other() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let mut client = client_for(&server).await;
        let result: Result<Value> = client.execute("query { viewer { login } }").await;
        match result {
            Err(ScrapeError::Other(message)) => assert!(message.contains("bad gateway")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
