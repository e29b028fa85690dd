//! Outbound HTTP client for the IndexNow endpoint.
//!
//! The transport never surfaces errors to its caller: every invocation yields
//! a status code plus an optional JSON body. Transport-level failures are
//! reported as a synthesized 500 with an `error` field so the service layer
//! has exactly one response shape to interpret.

use std::time::Duration;

use anyhow::Result;
use serde_json::{Value, json};

/// Timeout applied to every outbound request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport to the IndexNow endpoint.
///
/// One network attempt per invocation, no retries. Implementations must not
/// fail: connection errors, timeouts and other transport problems come back
/// as `(500, Some({"error": ...}))`, and a response body that is not JSON is
/// reported as `None` alongside the real status code.
pub trait IndexNowTransport {
    /// Issue a GET request with the given query parameters.
    async fn get(&self, url: &str, params: &[(&str, String)]) -> (u16, Option<Value>);

    /// Issue a POST request with the given JSON body.
    async fn post(&self, url: &str, body: &Value) -> (u16, Option<Value>);
}

/// Production transport backed by a shared `reqwest::Client`.
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client with the fixed user agent and request timeout.
    pub fn new(user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    /// Convert a send result into the `(status, body)` pair the service
    /// expects, synthesizing a 500 when the transport itself failed.
    async fn finish(result: Result<reqwest::Response, reqwest::Error>) -> (u16, Option<Value>) {
        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                // Best effort: many IndexNow responses have no body at all.
                let body = response.json::<Value>().await.ok();
                (status, body)
            }
            Err(e) if e.is_builder() => (
                500,
                Some(json!({ "error": format!("An unexpected error occurred: {e}") })),
            ),
            Err(e) => (500, Some(json!({ "error": format!("Request failed: {e}") }))),
        }
    }
}

impl IndexNowTransport for ApiClient {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> (u16, Option<Value>) {
        log::debug!("GET {url} with {} query parameters", params.len());
        let result = self.http.get(url).query(params).send().await;
        Self::finish(result).await
    }

    async fn post(&self, url: &str, body: &Value) -> (u16, Option<Value>) {
        log::debug!("POST {url}");
        let payload = match serde_json::to_vec(body) {
            Ok(bytes) => bytes,
            Err(e) => {
                return (
                    500,
                    Some(json!({ "error": format!("An unexpected error occurred: {e}") })),
                );
            }
        };
        let result = self
            .http
            .post(url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/json; charset=utf-8",
            )
            .body(payload)
            .send()
            .await;
        Self::finish(result).await
    }
}
