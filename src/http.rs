//! HTTP transport abstraction.
//!
//! The `HttpClient` trait abstracts request execution so the layers above
//! it can run against a mock in tests. Everything above this seam (the
//! gateway client, the poller, the orchestrator) is deterministic.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::GatewayError;

/// Response from an HTTP request.
///
/// Produced for ANY status code the server answered with; a transport
/// `Err` means the request never produced a response at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

/// Trait for executing HTTP requests.
///
/// Implemented by the production reqwest client and by the mock used in
/// tests, so the gateway and polling logic never depend on real HTTP
/// calls.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request.
    ///
    /// Attaches `Authorization: Token <api_key>` and a JSON content type.
    /// The timeout bounds the whole call.
    ///
    /// # Errors
    /// Returns an error if the request fails at the transport level:
    /// network issues, a timeout, or an invalid URL/method.
    async fn execute(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
        api_key: &str,
        timeout: Duration,
    ) -> Result<HttpResponse, GatewayError>;
}

/// Path portion of a URL, used as the lookup key by [`MockHttpClient`].
fn url_path(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, r)| r);
    match rest.find('/') {
        Some(i) => &rest[i..],
        None => "/",
    }
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self, body, api_key), fields(method = %method, url = %url))]
    async fn execute(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
        api_key: &str,
        timeout: Duration,
    ) -> Result<HttpResponse, GatewayError> {
        tracing::debug!(timeout_ms = timeout.as_millis() as u64, "executing HTTP request");

        let method: reqwest::Method = method.parse().map_err(|e| {
            anyhow::anyhow!("invalid HTTP method '{}': {}", method, e)
        })?;

        let mut req = self
            .client
            .request(method, url)
            .timeout(timeout)
            .header("Authorization", format!("Token {api_key}"))
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            req = req.body(body.to_string());
        }

        let response = req.send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, response_len = body.len(), "HTTP request completed");

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock HTTP client for testing.
///
/// Allows configuring predetermined responses for specific requests without
/// making actual HTTP calls.
///
/// # Example
/// ```ignore
/// let mock = MockHttpClient::new();
/// mock.add_response(
///     "GET /api/transaction/abc123/",
///     Ok(HttpResponse { status: 200, body: r#"{"status":"PENDING"}"#.to_string() }),
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Vec<Result<HttpResponse, GatewayError>>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// Record of a call made to the mock HTTP client.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
    pub api_key: String,
    pub timeout: Duration,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predetermined response for a specific method and path.
    ///
    /// The key is formatted as "{METHOD} {path}". Multiple responses can be
    /// added for the same key; they are returned in FIFO order.
    pub fn add_response(&self, key: &str, response: Result<HttpResponse, GatewayError>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(response);
    }

    /// Get all calls that have been made to this mock client.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
        api_key: &str,
        timeout: Duration,
    ) -> Result<HttpResponse, GatewayError> {
        self.calls.lock().push(MockCall {
            method: method.to_string(),
            url: url.to_string(),
            body: body.map(str::to_string),
            api_key: api_key.to_string(),
            timeout,
        });

        let key = format!("{} {}", method, url_path(url));
        let response = {
            let mut responses = self.responses.lock();
            match responses.get_mut(&key) {
                Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                _ => None,
            }
        };

        response.unwrap_or_else(|| {
            Err(GatewayError::Transport(anyhow::anyhow!(
                "no mock response configured for {}",
                key
            )))
        })
    }
}
