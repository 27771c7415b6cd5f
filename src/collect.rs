//! End-to-end collection flow.
//!
//! Sequences validation, initiation, polling, and outcome reporting. No
//! retries happen at this level; any stage error terminates the run.

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::gateway::{GatewayClient, PaymentRequest, TransactionReference};
use crate::http::HttpClient;
use crate::poll::{PollConfig, Poller, ProgressFn, TerminalOutcome};
use crate::validate;

/// Result of a full collection run: the reference the gateway assigned
/// and the terminal status polling observed.
#[derive(Debug, Clone)]
pub struct CollectOutcome {
    pub reference: TransactionReference,
    pub outcome: TerminalOutcome,
}

/// Validate, initiate, and poll a payment request to its terminal outcome.
///
/// Fails fast: a validation error returns before any network call, and an
/// initiation error returns before any status check. `on_initiated` runs
/// once the gateway has assigned a reference, before polling starts;
/// `progress` is forwarded to the poller.
pub async fn collect<H, F>(
    gateway: &GatewayClient<H>,
    poll_config: PollConfig,
    request: PaymentRequest,
    cancel: &CancellationToken,
    on_initiated: F,
    progress: Option<ProgressFn>,
) -> Result<CollectOutcome>
where
    H: HttpClient,
    F: FnOnce(&TransactionReference),
{
    validate::validate(&request)?;

    let reference = gateway.initiate(&request).await?;
    tracing::info!(reference = %reference, "transaction initiated");
    on_initiated(&reference);

    let mut poller = Poller::new(gateway, poll_config);
    if let Some(progress) = progress {
        poller = poller.with_progress(progress);
    }

    let outcome = poller.poll(&reference, cancel).await?;

    Ok(CollectOutcome { reference, outcome })
}
