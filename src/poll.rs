//! Status polling state machine.
//!
//! Drives repeated status checks against the gateway under a bounded time
//! budget, translating raw statuses into terminal outcomes. A session ends
//! on the first terminal status, on budget exhaustion, or when the
//! caller's cancellation token fires, whichever comes first.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::PollError;
use crate::gateway::{GatewayClient, TransactionReference, TransactionStatus};
use crate::http::HttpClient;

/// Callback invoked once per pending attempt with (attempt, max_attempts).
pub type ProgressFn = Arc<dyn Fn(u32, u32) + Send + Sync>;

/// Terminal outcome of a poll session.
///
/// Both variants are a successfully observed result; "Failed" means the
/// gateway reported the transaction as failed, not that the client broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOutcome {
    Successful,
    Failed,
}

impl std::fmt::Display for TerminalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalOutcome::Successful => f.write_str("Transaction Successful"),
            TerminalOutcome::Failed => f.write_str("Transaction Failed"),
        }
    }
}

/// Polling parameters.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Wait between consecutive status checks.
    pub interval: Duration,
    /// Status checks issued before the session times out.
    pub max_attempts: u32,
}

impl From<&Config> for PollConfig {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.poll_interval,
            max_attempts: config.max_poll_attempts,
        }
    }
}

/// Ephemeral state for one polling loop.
///
/// Owned exclusively by [`Poller::poll`] and dropped when the session
/// ends; nothing here is shared across sessions.
struct PollSession<'a> {
    reference: &'a TransactionReference,
    attempts: u32,
    deadline: Instant,
}

/// Drives status checks for a single transaction.
pub struct Poller<'a, H: HttpClient> {
    gateway: &'a GatewayClient<H>,
    config: PollConfig,
    progress: Option<ProgressFn>,
}

impl<'a, H: HttpClient> Poller<'a, H> {
    pub fn new(gateway: &'a GatewayClient<H>, config: PollConfig) -> Self {
        Self {
            gateway,
            config,
            progress: None,
        }
    }

    /// Install a progress callback, invoked once per pending attempt.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Poll until a terminal status, the attempt budget, the deadline, or
    /// the cancellation token ends the session.
    ///
    /// At most `max_attempts` status checks are issued, and the wall-clock
    /// duration is bounded by `max_attempts * interval` regardless of how
    /// the gateway behaves. Once `cancel` fires, no further checks are
    /// issued and the session returns within one interval tick. Any
    /// gateway error is fatal to the session.
    #[tracing::instrument(skip(self, cancel), fields(reference = %reference))]
    pub async fn poll(
        &self,
        reference: &TransactionReference,
        cancel: &CancellationToken,
    ) -> Result<TerminalOutcome, PollError> {
        let mut session = PollSession {
            reference,
            attempts: 0,
            deadline: Instant::now() + self.config.interval * self.config.max_attempts,
        };

        loop {
            // Checked before every status call, not only at sleep
            // boundaries: a token that fired during the previous check
            // must stop the session here.
            if cancel.is_cancelled() {
                tracing::info!(attempts = session.attempts, "polling cancelled");
                return Err(PollError::Cancelled);
            }
            if Instant::now() >= session.deadline {
                tracing::warn!(attempts = session.attempts, "polling deadline reached");
                return Err(PollError::Timeout {
                    attempts: session.attempts,
                });
            }

            let status = self.gateway.check_status(session.reference).await?;

            match status {
                TransactionStatus::Successful => {
                    tracing::info!(attempts = session.attempts, "transaction successful");
                    return Ok(TerminalOutcome::Successful);
                }
                TransactionStatus::Failed => {
                    tracing::info!(attempts = session.attempts, "transaction failed");
                    return Ok(TerminalOutcome::Failed);
                }
                TransactionStatus::Pending => {}
                TransactionStatus::Other(raw) => {
                    // Stays non-terminal; the attempt budget still bounds
                    // the session.
                    tracing::warn!(status = %raw, "unrecognized transaction status");
                }
            }

            session.attempts += 1;
            if let Some(progress) = &self.progress {
                progress(session.attempts, self.config.max_attempts);
            }
            tracing::debug!(
                attempt = session.attempts,
                max_attempts = self.config.max_attempts,
                "transaction still pending"
            );

            if session.attempts >= self.config.max_attempts {
                return Err(PollError::Timeout {
                    attempts: session.attempts,
                });
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(attempts = session.attempts, "polling cancelled during wait");
                    return Err(PollError::Cancelled);
                }
                _ = tokio::time::sleep_until(session.deadline) => {
                    return Err(PollError::Timeout { attempts: session.attempts });
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }
}
