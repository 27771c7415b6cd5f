//! End-to-end collection flow against the mock transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use momo_collect::collect::collect;
use momo_collect::config::Config;
use momo_collect::error::{CollectError, GatewayError, PollError};
use momo_collect::gateway::{GatewayClient, PaymentRequest};
use momo_collect::http::{HttpResponse, MockHttpClient};
use momo_collect::poll::{PollConfig, ProgressFn, TerminalOutcome};

const INITIATE_KEY: &str = "POST /api/collect/";
const STATUS_KEY: &str = "GET /api/transaction/abc123/";

fn test_config() -> Config {
    Config {
        base_url: "https://gateway.test/api".to_string(),
        api_key: "test-key".to_string(),
        poll_interval: Duration::from_millis(10),
        max_poll_attempts: 5,
        request_timeout: Duration::from_secs(1),
        transport_retries: 0,
        retry_backoff: Duration::from_millis(1),
    }
}

fn payment_request() -> PaymentRequest {
    PaymentRequest {
        amount: "500".to_string(),
        from: "677123456".to_string(),
        description: "Payment test".to_string(),
    }
}

fn initiate_ok() -> HttpResponse {
    HttpResponse {
        status: 200,
        body: r#"{"reference":"abc123","status":"PENDING","message":""}"#.to_string(),
    }
}

fn status_ok(status: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: format!(r#"{{"status":"{status}"}}"#),
    }
}

#[tokio::test(start_paused = true)]
async fn pending_then_successful_reports_transaction_successful() {
    let http = MockHttpClient::new();
    http.add_response(INITIATE_KEY, Ok(initiate_ok()));
    http.add_response(STATUS_KEY, Ok(status_ok("PENDING")));
    http.add_response(STATUS_KEY, Ok(status_ok("SUCCESSFUL")));

    let config = test_config();
    let gateway = GatewayClient::new(&config, http.clone());

    let initiated = Arc::new(AtomicU32::new(0));
    let initiated_probe = initiated.clone();
    let attempts_seen = Arc::new(AtomicU32::new(0));
    let attempts_probe = attempts_seen.clone();
    let progress: ProgressFn = Arc::new(move |attempt, _max| {
        attempts_probe.store(attempt, Ordering::SeqCst);
    });

    let result = collect(
        &gateway,
        PollConfig::from(&config),
        payment_request(),
        &CancellationToken::new(),
        |reference| {
            assert_eq!(reference.as_str(), "abc123");
            initiated_probe.fetch_add(1, Ordering::SeqCst);
        },
        Some(progress),
    )
    .await
    .unwrap();

    assert_eq!(result.outcome, TerminalOutcome::Successful);
    assert_eq!(result.outcome.to_string(), "Transaction Successful");
    assert_eq!(result.reference.as_str(), "abc123");

    // One initiation plus two status checks, in order.
    let calls = http.get_calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[1].method, "GET");
    assert_eq!(calls[2].method, "GET");

    assert_eq!(initiated.load(Ordering::SeqCst), 1);
    assert_eq!(attempts_seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn initiate_rejection_surfaces_status_and_message_without_polling() {
    let http = MockHttpClient::new();
    http.add_response(
        INITIATE_KEY,
        Ok(HttpResponse {
            status: 400,
            body: r#"{"message":"invalid credentials"}"#.to_string(),
        }),
    );

    let config = test_config();
    let gateway = GatewayClient::new(&config, http.clone());

    let err = collect(
        &gateway,
        PollConfig::from(&config),
        payment_request(),
        &CancellationToken::new(),
        |_| panic!("must not reach initiation callback"),
        None,
    )
    .await
    .unwrap_err();

    match &err {
        CollectError::Gateway(GatewayError::Api { status, message }) => {
            assert_eq!(*status, 400);
            assert_eq!(message, "invalid credentials");
        }
        other => panic!("expected gateway API error, got {other:?}"),
    }

    // The user-facing message names the status code and gateway message.
    let rendered = err.to_string();
    assert!(rendered.contains("400"), "missing status in: {rendered}");
    assert!(
        rendered.contains("invalid credentials"),
        "missing message in: {rendered}"
    );

    // Initiation failed, so no status check was ever issued.
    assert_eq!(http.call_count(), 1);
}

#[tokio::test]
async fn validation_failure_makes_no_network_calls() {
    let http = MockHttpClient::new();
    let config = test_config();
    let gateway = GatewayClient::new(&config, http.clone());

    let bad_request = PaymentRequest {
        amount: "500".to_string(),
        from: "12345".to_string(),
        description: "Payment test".to_string(),
    };

    let err = collect(
        &gateway,
        PollConfig::from(&config),
        bad_request,
        &CancellationToken::new(),
        |_| panic!("must not reach initiation callback"),
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CollectError::Validation(_)));
    assert_eq!(http.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn persistent_pending_times_out_with_exit_worthy_error() {
    let http = MockHttpClient::new();
    http.add_response(INITIATE_KEY, Ok(initiate_ok()));
    for _ in 0..10 {
        http.add_response(STATUS_KEY, Ok(status_ok("PENDING")));
    }

    let config = Config {
        max_poll_attempts: 2,
        ..test_config()
    };
    let gateway = GatewayClient::new(&config, http.clone());

    let err = collect(
        &gateway,
        PollConfig::from(&config),
        payment_request(),
        &CancellationToken::new(),
        |_| {},
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        CollectError::Poll(PollError::Timeout { attempts: 2 })
    ));
    // One initiation plus exactly the attempt budget of status checks.
    assert_eq!(http.call_count(), 3);
}

#[tokio::test]
async fn gateway_reported_failure_is_an_outcome_not_an_error() {
    let http = MockHttpClient::new();
    http.add_response(INITIATE_KEY, Ok(initiate_ok()));
    http.add_response(STATUS_KEY, Ok(status_ok("FAILED")));

    let config = test_config();
    let gateway = GatewayClient::new(&config, http);

    let result = collect(
        &gateway,
        PollConfig::from(&config),
        payment_request(),
        &CancellationToken::new(),
        |_| {},
        None,
    )
    .await
    .unwrap();

    assert_eq!(result.outcome, TerminalOutcome::Failed);
    assert_eq!(result.outcome.to_string(), "Transaction Failed");
}
