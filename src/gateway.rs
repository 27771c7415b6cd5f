//! Gateway client: payment initiation and status checks.
//!
//! Wraps the HTTP transport with authentication, bounded transport retry,
//! and status-code interpretation. The wire contract is two endpoints:
//! `POST /collect/` to submit a payment and `GET /transaction/{reference}/`
//! to observe it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::GatewayError;
use crate::http::{HttpClient, HttpResponse};

/// A payment collection request.
///
/// Constructed from user input, immutable once validated, and consumed
/// exactly once by [`GatewayClient::initiate`]. Serializes directly as the
/// initiate request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub amount: String,
    pub from: String,
    pub description: String,
}

/// Opaque identifier the gateway assigns to a submitted transaction.
///
/// Non-empty for any reference produced by [`GatewayClient::initiate`];
/// all subsequent status checks are keyed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReference(pub String);

impl TransactionReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionReference {
    fn from(reference: &str) -> Self {
        TransactionReference(reference.to_string())
    }
}

/// Transaction status as reported by the gateway.
///
/// The contract defines PENDING as the only non-terminal status and
/// SUCCESSFUL/FAILED as terminal. Anything else is carried as `Other` and
/// treated as non-terminal by the poller, so a new intermediate status on
/// the gateway side cannot wedge a run into an error state. The attempt
/// budget still bounds the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Successful,
    Failed,
    Other(String),
}

impl TransactionStatus {
    fn from_raw(raw: &str) -> Self {
        match raw {
            "PENDING" => TransactionStatus::Pending,
            "SUCCESSFUL" => TransactionStatus::Successful,
            "FAILED" => TransactionStatus::Failed,
            other => TransactionStatus::Other(other.to_string()),
        }
    }

    /// Terminal statuses end a polling session immediately.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Successful | TransactionStatus::Failed
        )
    }
}

/// Success body of `POST /collect/`.
#[derive(Debug, Deserialize)]
struct InitiateResponse {
    #[serde(default)]
    reference: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// Body of `GET /transaction/{reference}/`.
#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: String,
}

/// Error body shape. The message field is not guaranteed on the wire;
/// callers fall back to the raw body when it is absent.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Client for the payment gateway.
///
/// Constructed once from [`Config`] plus a transport and shared by
/// reference; holds no global state. Both calls attach the token
/// credential header, apply the per-call timeout, and retry transport
/// failures a bounded number of times with a fixed backoff.
/// Application-level error responses are never retried.
pub struct GatewayClient<H: HttpClient> {
    http: H,
    base_url: String,
    api_key: String,
    timeout: Duration,
    transport_retries: u32,
    retry_backoff: Duration,
}

impl<H: HttpClient> GatewayClient<H> {
    pub fn new(config: &Config, http: H) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: config.request_timeout,
            transport_retries: config.transport_retries,
            retry_backoff: config.retry_backoff,
        }
    }

    /// Submit a collection request.
    ///
    /// A 2xx response must carry a non-empty `reference`; a 2xx response
    /// without one is a malformed gateway response and fails with
    /// [`GatewayError::MissingReference`].
    #[tracing::instrument(skip(self, request), fields(from = %request.from))]
    pub async fn initiate(
        &self,
        request: &PaymentRequest,
    ) -> Result<TransactionReference, GatewayError> {
        let url = format!("{}/collect/", self.base_url);
        let body = serde_json::to_string(request)?;

        let response = self.execute_with_retry("POST", &url, Some(&body)).await?;
        let response = check_api_status(response)?;

        let init: InitiateResponse = serde_json::from_str(&response.body)?;
        tracing::debug!(status = %init.status, "initiate response received");

        if init.reference.is_empty() {
            return Err(GatewayError::MissingReference {
                message: init.message,
            });
        }

        Ok(TransactionReference(init.reference))
    }

    /// Fetch the current status of a transaction.
    #[tracing::instrument(skip(self), fields(reference = %reference))]
    pub async fn check_status(
        &self,
        reference: &TransactionReference,
    ) -> Result<TransactionStatus, GatewayError> {
        let url = format!("{}/transaction/{}/", self.base_url, reference);

        let response = self.execute_with_retry("GET", &url, None).await?;
        let response = check_api_status(response)?;

        let status: StatusResponse = serde_json::from_str(&response.body)?;
        Ok(TransactionStatus::from_raw(&status.status))
    }

    /// Execute a call, retrying transport failures only.
    ///
    /// A response ends the retry loop whatever its status code; only an
    /// `Err` from the transport (the request never produced a response)
    /// is retried, up to the configured bound with a fixed backoff.
    async fn execute_with_retry(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
    ) -> Result<HttpResponse, GatewayError> {
        let mut attempt = 0;
        loop {
            match self
                .http
                .execute(method, url, body, &self.api_key, self.timeout)
                .await
            {
                Ok(response) => return Ok(response),
                Err(err) if attempt < self.transport_retries => {
                    attempt += 1;
                    tracing::warn!(
                        method = %method,
                        url = %url,
                        attempt,
                        error = %err,
                        "transport failure, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Map a non-2xx response to an API error, extracting the body's message
/// field when it parses as JSON.
fn check_api_status(response: HttpResponse) -> Result<HttpResponse, GatewayError> {
    if (200..300).contains(&response.status) {
        return Ok(response);
    }

    let message = serde_json::from_str::<ErrorResponse>(&response.body)
        .map(|e| e.message)
        .unwrap_or_else(|_| response.body.clone());

    Err(GatewayError::Api {
        status: response.status,
        message,
    })
}
